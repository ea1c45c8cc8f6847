use std::io::ErrorKind;
use std::path::Path;

use crate::domain::DomainError;

/// Column read when the configuration does not name one.
pub const DEFAULT_FEATURE_COLUMN: &str = "feature_classes";

/// Read the feature class identifiers listed under `column` in a CSV file.
///
/// The header must match `column` exactly and cells are taken verbatim;
/// surrounding whitespace is part of the identifier. Only empty cells and
/// rows too short to reach the column are skipped.
pub fn read_feature_class_list(path: &Path, column: &str) -> Result<Vec<String>, DomainError> {
    let content = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            DomainError::MissingInput(format!("The file '{}' was not found.", path.display()))
        }
        _ => DomainError::Io(format!("Failed to read '{}': {}", path.display(), e)),
    })?;
    parse_feature_class_csv(&content, column)
}

pub fn parse_feature_class_csv(content: &[u8], column: &str) -> Result<Vec<String>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let index = rdr
        .headers()
        .map_err(|e| DomainError::Parse(format!("CSV header error: {}", e)))?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| {
            DomainError::MissingInput(format!("Column '{}' not found in the CSV file.", column))
        })?;

    let mut identifiers = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| DomainError::Parse(format!("CSV parse error: {}", e)))?;

        // Short rows and empty cells carry no identifier
        if let Some(value) = record.get(index).filter(|v| !v.is_empty()) {
            identifiers.push(value.to_string());
        }
    }

    Ok(identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_named_column() {
        let csv = b"OBJECTID,FEATURE_CLASS_NAME,OWNER\n1,roads,GIS\n2,parcels,GIS\n3,Alpha,GIS\n";
        let ids = parse_feature_class_csv(csv, "FEATURE_CLASS_NAME").unwrap();
        assert_eq!(ids, vec!["roads", "parcels", "Alpha"]);
    }

    #[test]
    fn test_empty_cells_and_short_rows_are_skipped() {
        let csv = b"id,feature_classes\n1,roads\n2,\n3\n4,\"GIS.PARCELS\"\n";
        let ids = parse_feature_class_csv(csv, DEFAULT_FEATURE_COLUMN).unwrap();
        assert_eq!(ids, vec!["roads", "GIS.PARCELS"]);
    }

    #[test]
    fn test_cells_and_headers_are_not_trimmed() {
        let csv = b"id, feature_classes,feature_classes\n1,x, roads \n";
        let ids = parse_feature_class_csv(csv, DEFAULT_FEATURE_COLUMN).unwrap();
        assert_eq!(ids, vec![" roads "]);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_feature_class_csv(b"name\nroads\n", "FEATURE_CLASS_NAME").unwrap_err();
        assert!(matches!(err, DomainError::MissingInput(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_feature_class_list(&dir.path().join("absent.csv"), DEFAULT_FEATURE_COLUMN)
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingInput(_)));
    }

    #[test]
    fn test_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_feature_classes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "feature_classes").unwrap();
        writeln!(file, "GIS.HYDRANTS").unwrap();
        drop(file);

        let ids = read_feature_class_list(&path, DEFAULT_FEATURE_COLUMN).unwrap();
        assert_eq!(ids, vec!["GIS.HYDRANTS"]);
    }
}
