use std::time::Duration;

/// Round `duration` for display
///
/// Anything over a minute is shown to the second.  Shorter durations keep three significant
/// digits, starting from the largest unit (1s, 100ms, ..., 1µs) they exceed.
pub fn format_duration(duration: Duration) -> humantime::FormattedDuration {
    humantime::format_duration(round_duration(duration))
}

pub(crate) fn round_duration(duration: Duration) -> Duration {
    const MINUTE: Duration = Duration::from_secs(60);

    if duration > MINUTE {
        return round(duration, Duration::from_secs(1));
    }
    let mut unit = Duration::from_secs(1);
    while unit >= Duration::from_micros(1) {
        if duration > unit {
            return round(duration, unit / 100);
        }
        unit /= 10;
    }
    duration
}

/// Round to the nearest multiple of `multiple`, halfway values away from zero
fn round(duration: Duration, multiple: Duration) -> Duration {
    let nanos = duration.as_nanos();
    let multiple = multiple.as_nanos();
    if multiple == 0 {
        return duration;
    }
    let remainder = nanos % multiple;
    let rounded = if remainder + remainder < multiple {
        nanos - remainder
    } else {
        nanos + (multiple - remainder)
    };
    Duration::from_nanos(u64::try_from(rounded).unwrap_or(u64::MAX))
}
