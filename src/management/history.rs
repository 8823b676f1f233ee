use std::path::Path;

use crate::{management::DatasetError, types::HistoryRecord, utils::RecordFilter};

/// Reads a streaming history export and applies `filter` to it.
///
/// The file is a JSON array of `{msPlayed, endTime, artistName, trackName}`
/// objects with `endTime` in `YYYY-MM-DD HH:MM` format.
pub async fn read_history(
    path: impl AsRef<Path>,
    filter: &RecordFilter,
) -> Result<Vec<HistoryRecord>, DatasetError> {
    let json = async_fs::read_to_string(path.as_ref())
        .await
        .map_err(DatasetError::IoError)?;
    let history: Vec<HistoryRecord> =
        serde_json::from_str(&json).map_err(DatasetError::SerdeError)?;
    Ok(filter.apply(history))
}
