/// Lines of unchanged output shown around each change
#[cfg(feature = "diff")]
const CONTEXT: usize = 3;

/// Render how `actual` differs from `expected`
///
/// Text gets a line diff; anything that isn't UTF-8 is shown as the two full blocks.
pub fn write_diff(
    writer: &mut dyn std::fmt::Write,
    expected: &[u8],
    actual: &[u8],
    expected_name: Option<&dyn std::fmt::Display>,
    actual_name: Option<&dyn std::fmt::Display>,
    palette: crate::report::Palette,
) -> Result<(), std::fmt::Error> {
    #[allow(unused_mut)]
    let mut rendered = false;
    #[cfg(feature = "diff")]
    if let (Ok(expected), Ok(actual)) = (std::str::from_utf8(expected), std::str::from_utf8(actual))
    {
        write_diff_inner(
            writer,
            expected,
            actual,
            expected_name,
            actual_name,
            palette,
        )?;
        rendered = true;
    }

    if !rendered {
        let expected = String::from_utf8_lossy(expected);
        let actual = String::from_utf8_lossy(actual);
        if let Some(expected_name) = expected_name {
            writeln!(writer, "{} {}:", expected_name, palette.info("(expected)"))?;
        } else {
            writeln!(writer, "{}:", palette.info("Expected"))?;
        }
        writeln!(writer, "{}", palette.info(&expected))?;
        if let Some(actual_name) = actual_name {
            writeln!(writer, "{} {}:", actual_name, palette.error("(actual)"))?;
        } else {
            writeln!(writer, "{}:", palette.error("Actual"))?;
        }
        writeln!(writer, "{}", palette.error(&actual))?;
    }
    Ok(())
}

#[cfg(feature = "diff")]
fn write_diff_inner(
    writer: &mut dyn std::fmt::Write,
    expected: &str,
    actual: &str,
    expected_name: Option<&dyn std::fmt::Display>,
    actual_name: Option<&dyn std::fmt::Display>,
    palette: crate::report::Palette,
) -> Result<(), std::fmt::Error> {
    let changes = similar::TextDiff::configure()
        .algorithm(similar::Algorithm::Patience)
        .timeout(std::time::Duration::from_millis(500))
        .newline_terminated(false)
        .diff_lines(expected, actual);

    writeln!(writer)?;
    if let Some(expected_name) = expected_name {
        writeln!(
            writer,
            "{}",
            palette.info(format_args!("--- {} (expected)", expected_name))
        )?;
    } else {
        writeln!(writer, "{}", palette.info(format_args!("--- Expected")))?;
    }
    if let Some(actual_name) = actual_name {
        writeln!(
            writer,
            "{}",
            palette.error(format_args!("+++ {} (actual)", actual_name))
        )?;
    } else {
        writeln!(writer, "{}", palette.error(format_args!("+++ Actual")))?;
    }
    for (i, group) in changes.grouped_ops(CONTEXT).iter().enumerate() {
        if i != 0 {
            writeln!(writer, "{}", palette.hint("   ...     ..."))?;
        }
        for op in group {
            for change in changes.iter_inline_changes(op) {
                match change.tag() {
                    similar::ChangeTag::Insert => {
                        write_change(writer, change, "+", palette.actual, palette.error, palette)?;
                    }
                    similar::ChangeTag::Delete => {
                        write_change(writer, change, "-", palette.expected, palette.info, palette)?;
                    }
                    similar::ChangeTag::Equal => {
                        write_change(writer, change, "|", palette.hint, palette.hint, palette)?;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "diff")]
fn write_change(
    writer: &mut dyn std::fmt::Write,
    change: similar::InlineChange<'_, str>,
    sign: &str,
    em_style: anstyle::Style,
    style: anstyle::Style,
    palette: crate::report::Palette,
) -> Result<(), std::fmt::Error> {
    use crate::report::color::Styled;

    if let Some(index) = change.old_index() {
        write!(writer, "{:>4} ", palette.hint(index + 1),)?;
    } else {
        write!(writer, "{:>4} ", " ",)?;
    }
    if let Some(index) = change.new_index() {
        write!(writer, "{:>4} ", palette.hint(index + 1),)?;
    } else {
        write!(writer, "{:>4} ", " ",)?;
    }
    write!(writer, "{} ", Styled::new(sign, style))?;
    for &(emphasized, change) in change.values() {
        let cur_style = if emphasized { em_style } else { style };
        write!(writer, "{}", Styled::new(change, cur_style))?;
    }
    if change.missing_newline() {
        writeln!(writer, "{}", Styled::new("∅", em_style))?;
    }

    Ok(())
}
