use std::{fmt, io::Error, path::Path};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{types::EnrichedRecord, utils::RecordFilter};

#[derive(Debug)]
pub enum DatasetError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::IoError(e) => write!(f, "{}", e),
            DatasetError::SerdeError(e) => write!(f, "invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<Error> for DatasetError {
    fn from(err: Error) -> Self {
        DatasetError::IoError(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::SerdeError(err)
    }
}

/// Owns an enriched dataset and moves it to and from disk.
///
/// The file is a pretty-printed JSON array (4-space indent) of
/// `{ms_played, end_time, artist_name, track_name, spotify_id, data}` objects.
pub struct DatasetManager {
    records: Vec<EnrichedRecord>,
}

impl DatasetManager {
    pub fn new(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }

    /// Loads a dataset file and applies `filter` to its records.
    pub async fn load(path: impl AsRef<Path>, filter: &RecordFilter) -> Result<Self, DatasetError> {
        let json = async_fs::read_to_string(path.as_ref()).await?;
        let records: Vec<EnrichedRecord> = serde_json::from_str(&json)?;
        Ok(Self {
            records: filter.apply(records),
        })
    }

    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(path, self.to_json()?).await?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<Vec<u8>, DatasetError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.records.serialize(&mut serializer)?;
        Ok(buf)
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EnrichedRecord> {
        self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}
