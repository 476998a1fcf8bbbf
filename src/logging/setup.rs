use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

fn create_log_file(log_dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("wardrobe_matcher_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    Ok((log_path, file))
}

/// Install the global subscriber.
///
/// Events always go to stderr so command output on stdout stays clean. When
/// `log_dir` is given, a timestamped log file is also written there and its
/// path is returned. Fails with `AlreadyExists` if a global subscriber is
/// already installed; no log file is left behind in that case.
pub fn setup_logging(log_dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let (log_path, file_layer) = match log_dir {
        Some(dir) => {
            let (path, file) = create_log_file(dir)?;
            let layer = fmt::layer()
                .event_format(BracketedFormatter)
                .with_writer(Mutex::new(file))
                .with_ansi(false);
            (Some(path), Some(layer))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stderr);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    if let Err(e) = installed {
        if let Some(path) = &log_path {
            let _ = fs::remove_file(path);
        }
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, e));
    }

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }

    Ok(log_path)
}
