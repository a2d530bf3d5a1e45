#[cfg(unix)]
mod cli;
