//! Spotify Listening History Visualizer Library
//!
//! This library enriches a Spotify streaming history export with audio
//! features fetched from the Spotify Web API and turns the enriched dataset
//! into simple time-series plots.
//!
//! # Modules
//!
//! - `aggregate` - Grouping of enriched records into plot values
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management, endpoints and credentials
//! - `management` - History/dataset files and the lookup cache
//! - `pipeline` - The enrichment pass over a listening history
//! - `plot` - Line chart rendering
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Filtering, timestamp formatting and small helpers
//!
//! # Example
//!
//! ```
//! use sporlviz::{config, management::read_history, utils::RecordFilter};
//!
//! #[tokio::main]
//! async fn main() -> sporlviz::Res<()> {
//!     config::load_env()?;
//!     let history = read_history("StreamingHistory0.json", &RecordFilter::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod management;
pub mod pipeline;
pub mod plot;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object so the different error types of
/// the crate can be propagated with `?` from one place.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// All console output goes to standard error; standard output is left to the
/// progress indicator.
///
/// # Example
///
/// ```
/// info!("Reading history file");
/// info!("Found {} records", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only used
/// for fatal errors at the command level; library code returns `Result`.
///
/// # Example
///
/// ```
/// error!("No data file provided (-d)");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable conditions such as a rate-limit pause.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
