//! CSV report writers.
//!
//! Both reports are written in one pass after the job has collected every
//! row, and any previous file at the output path is overwritten.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::domain::DomainError;
use crate::models::feature_class::HEADERS;
use crate::models::{CatalogEntry, FeatureClassRecord};

/// Inventory columns, in output order.
pub const INVENTORY_HEADERS: [&str; 6] = [
    "FeatureDataset",
    "FeatureClass",
    "GeometryType",
    "SpatialReference",
    "IsVersioned",
    "CatalogPath",
];

fn create_output(path: &Path) -> Result<File, DomainError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path)
        .map_err(|e| DomainError::Io(format!("Failed to create '{}': {}", path.display(), e)))
}

/// Write harvested records, optionally preceded by an unnamed 0-based index column.
pub fn write_harvest_csv<W: Write>(
    out: W,
    records: &[FeatureClassRecord],
    include_index: bool,
) -> Result<(), DomainError> {
    let mut wtr = Writer::from_writer(out);

    if include_index {
        wtr.write_record(std::iter::once("").chain(HEADERS))?;
    } else {
        wtr.write_record(HEADERS)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = record.to_row();
        if include_index {
            let index = i.to_string();
            wtr.write_record(std::iter::once(index.as_str()).chain(row))?;
        } else {
            wtr.write_record(row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_harvest_report(
    path: &Path,
    records: &[FeatureClassRecord],
    include_index: bool,
) -> Result<(), DomainError> {
    write_harvest_csv(create_output(path)?, records, include_index)
}

pub fn write_inventory_csv<W: Write>(out: W, entries: &[CatalogEntry]) -> Result<(), DomainError> {
    // Header written by hand so an empty inventory still gets one
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(INVENTORY_HEADERS)?;
    for entry in entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_inventory_report(path: &Path, entries: &[CatalogEntry]) -> Result<(), DomainError> {
    write_inventory_csv(create_output(path)?, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest_to_string(records: &[FeatureClassRecord], include_index: bool) -> String {
        let mut buf = Vec::new();
        write_harvest_csv(&mut buf, records, include_index).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_free_text_is_quoted() {
        let record = FeatureClassRecord {
            feature_set: "roads".to_string(),
            summary: Some("Centerlines, all \"public\" roads\nsecond line".to_string()),
            ..Default::default()
        };
        let out = harvest_to_string(&[record.clone()], false);

        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADERS.to_vec());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], record.summary.as_deref().unwrap());
        assert_eq!(&rows[0][1], "N/A");
    }

    #[test]
    fn test_index_column() {
        let records = vec![
            FeatureClassRecord::unavailable("Alpha"),
            FeatureClassRecord::unavailable("roads"),
        ];
        let out = harvest_to_string(&records, true);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("\"\",Feature Set,") || lines[0].starts_with(",Feature Set,"));
        assert!(lines[1].starts_with("0,Alpha,"));
        assert!(lines[2].starts_with("1,roads,"));
    }

    #[test]
    fn test_empty_inventory_keeps_header() {
        let mut buf = Vec::new();
        write_inventory_csv(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "FeatureDataset,FeatureClass,GeometryType,SpatialReference,IsVersioned,CatalogPath\n"
        );
    }

    #[test]
    fn test_inventory_row_omits_owner() {
        let entry = CatalogEntry {
            feature_dataset: "Hydro".to_string(),
            feature_class: "GIS.Rivers".to_string(),
            geometry_type: "Polyline".to_string(),
            spatial_reference: "NAD_1983_StatePlane".to_string(),
            is_versioned: true,
            catalog_path: "conn.sde/Hydro/GIS.Rivers".to_string(),
            owner: Some("GIS".to_string()),
        };
        let mut buf = Vec::new();
        write_inventory_csv(&mut buf, &[entry]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out.lines().nth(1).unwrap(),
            "Hydro,GIS.Rivers,Polyline,NAD_1983_StatePlane,True,conn.sde/Hydro/GIS.Rivers"
        );
    }

    #[test]
    fn test_report_creates_parent_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs").join("results.csv");
        write_harvest_report(&path, &[FeatureClassRecord::unavailable("a")], false).unwrap();
        write_harvest_report(&path, &[], false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
