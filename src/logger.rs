//! Log setup
//!
//! Lines look like
//! `2024-05-01T10:00:00Z INFO in 'vicky::config' at line 42: message`.
//! `RUST_LOG` overrides the level picked from the command line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::error::Result;

/// Level for the `--silent` and `--verbose` flags
///
/// Silent wins when both are given.
pub fn level(silent: bool, verbose: bool) -> LevelFilter {
    if silent {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger
///
/// Logs go to `log_file` when given (its directory is created if needed)
/// and to stderr otherwise. A second call leaves the first logger active.
pub fn init(silent: bool, verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level(silent, verbose))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} in '{}' at line {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

    if let Some(path) = log_file {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    let _ = builder.is_test(false).try_init();
    log::info!("Logger initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_flags() {
        assert_eq!(level(false, false), LevelFilter::Info);
        assert_eq!(level(false, true), LevelFilter::Debug);
        assert_eq!(level(true, false), LevelFilter::Error);
        assert_eq!(level(true, true), LevelFilter::Error);
    }

    #[test]
    fn test_log_file_directory_created() {
        let dir = std::env::temp_dir().join(format!("vicky-log-{}", std::process::id()));
        let path = dir.join("nested").join("vicky.log");
        init(false, false, Some(&path)).unwrap();
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
