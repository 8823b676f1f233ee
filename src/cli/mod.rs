//! # CLI Module
//!
//! One function per subcommand. Each function owns the user-facing side of
//! its command: stage announcements, the progress bar, and turning any error
//! into a fatal `error!` that ends the process with exit code 1.
//!
//! ## Commands
//!
//! - [`generate_dataset`] - history file → Spotify lookups → dataset file
//! - [`visualize`] - dataset file → one feature over time (optionally per day)
//! - [`visualize_time`] - dataset file → plays and minutes listened per day
//!
//! ## Data Flow
//!
//! ```text
//! history.json ──read_history──▶ enrich (LookupClient) ──persist──▶ dataset.json
//! dataset.json ──DatasetManager::load──▶ aggregate ──render_line_chart──▶ plot.png
//! ```

mod dataset;
mod visualize;

use std::path::PathBuf;

use crate::utils::RecordFilter;

pub use dataset::generate_dataset;
pub use visualize::visualize;
pub use visualize::visualize_time;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub cache: bool,
    pub hist_file: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub plot_file: PathBuf,
    pub filter: RecordFilter,
}
