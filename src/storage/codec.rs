//! CSV encode/decode shared by every backend

use crate::dataset::{Dataset, LaunchRecord};
use crate::storage::StoreError;

/// Encodes the dataset as a CSV blob with a header row
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>, StoreError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for record in &dataset.records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StoreError::Io)?;
    }
    Ok(buffer)
}

/// Decodes a CSV blob
///
/// A malformed row — including a non-empty unparseable `Date` — is an
/// error, not a skip.
pub fn read_csv(bytes: &[u8]) -> Result<Dataset, StoreError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut records = Vec::new();
    for row in reader.deserialize::<LaunchRecord>() {
        records.push(row?);
    }
    Ok(Dataset::new(records))
}
