use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialise env_logger.
///
/// `RUST_LOG` wins over the verbosity count. With `log_file` the output is
/// piped to that file, truncated on each run.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialised")?;
    Ok(())
}
