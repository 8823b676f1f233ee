mod cache;
mod dataset;
mod history;

pub use cache::LookupCache;
pub use dataset::DatasetError;
pub use dataset::DatasetManager;
pub use history::read_history;
