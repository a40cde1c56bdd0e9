//! Shared CSV access for the generators: opening an extract and locating its columns by header.

use crate::errors::MissingColumnsError;
use anyhow::Result;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Opens a delimited extract whose first line holds the headers. Rows may have fewer fields than
/// the header.
pub fn open_csv(path: &Path, delimiter: u8) -> Result<Reader<File>> {
    let reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::None)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

/// Resolves each name in `required` to its index in `headers`, in the same order.
///
/// Every missing name is reported at once in a [`MissingColumnsError`].
pub fn column_indices<S: AsRef<str>>(
    file: &Path,
    headers: &StringRecord,
    required: &[S],
) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match headers.iter().position(|h| h == name.as_ref()) {
            Some(idx) => indices.push(idx),
            None => missing.push(name.as_ref().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(MissingColumnsError {
            file: file.to_path_buf(),
            columns: missing,
        }
        .into());
    }
    Ok(indices)
}

/// Field accessor that treats absent trailing fields as empty.
pub fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_in_requested_order() {
        let headers = StringRecord::from(vec!["a", "b", "c"]);
        let idx = column_indices(Path::new("x.csv"), &headers, &["c", "a"]).unwrap();
        assert_eq!(idx, vec![2, 0]);
    }

    #[test]
    fn reports_every_missing_column() {
        let headers = StringRecord::from(vec!["a"]);
        let err = column_indices(Path::new("x.csv"), &headers, &["b", "a", "c"]).unwrap_err();
        let missing = err.downcast_ref::<MissingColumnsError>().unwrap();
        assert_eq!(missing.columns, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let record = StringRecord::from(vec!["only"]);
        assert_eq!(field(&record, 0), "only");
        assert_eq!(field(&record, 3), "");
    }
}
