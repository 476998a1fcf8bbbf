//! Logging for the wardrobe matcher
//!
//! - Bracketed event formatting
//! - stderr output, plus an optional timestamped log file

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
