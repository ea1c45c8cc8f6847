//! Mapping from a metadata document to a [`FeatureClassRecord`].

use super::dates::normalize_date;
use super::document::MetadataDocument;
use crate::models::FeatureClassRecord;

pub const CREATION_DATE: &str = "Esri/CreaDate";
pub const SUMMARY: &str = "idinfo/descript/purpose";
pub const DESCRIPTION: &str = "idinfo/descript/abstract";
pub const CREATION_TIME: &str = "Esri/CreaTime";
pub const ARCGIS_FORMAT: &str = "Esri/ArcGISFormat";
pub const SYNC_ONCE: &str = "Esri/SyncOnce";
pub const ITEM_NAME: &str = "Esri/DataProperties/itemProps/itemName";
pub const SYNC_DATE: &str = "Esri/SyncDate";
pub const SYNC_TIME: &str = "Esri/SyncTime";
pub const MODIFICATION_DATE: &str = "Esri/ModDate";
pub const MODIFICATION_TIME: &str = "Esri/ModTime";
pub const ENVIRONMENT_DESCRIPTION: &str = "dataIdInfo/envirDesc";
pub const FORMAT_NAME: &str = "distInfo/distFormat/formatName";
pub const HIERARCHY_LEVEL_NAME: &str = "mdHrLvName";
pub const METADATA_DATE_STAMP: &str = "mdDateSt";
pub const ENTITY_TYPE_LABEL: &str = "eainfo/detailed/enttyp/enttypl";
pub const ENTITY_TYPE_DEFINITION: &str = "eainfo/detailed/enttyp/enttypt";

fn text_at(doc: &MetadataDocument, path: &str) -> Option<String> {
    doc.find(path).map(|node| node.text().to_string())
}

fn date_at(doc: &MetadataDocument, path: &str) -> Option<String> {
    doc.find(path).map(|node| match node.text() {
        "" => String::new(),
        raw => normalize_date(raw),
    })
}

/// Build the report record of `feature_class` from its metadata document.
pub fn extract_record(doc: &MetadataDocument, feature_class: &str) -> FeatureClassRecord {
    FeatureClassRecord {
        feature_set: feature_class.to_string(),
        create_date: date_at(doc, CREATION_DATE),
        summary: text_at(doc, SUMMARY),
        description: text_at(doc, DESCRIPTION),
        create_time: text_at(doc, CREATION_TIME),
        arcgis_format: text_at(doc, ARCGIS_FORMAT),
        sync_once: text_at(doc, SYNC_ONCE),
        item_name: text_at(doc, ITEM_NAME),
        sync_date: date_at(doc, SYNC_DATE),
        sync_time: text_at(doc, SYNC_TIME),
        mod_date: date_at(doc, MODIFICATION_DATE),
        mod_time: text_at(doc, MODIFICATION_TIME),
        envir_desc: text_at(doc, ENVIRONMENT_DESCRIPTION),
        format_name: text_at(doc, FORMAT_NAME),
        md_hr_lv_name: text_at(doc, HIERARCHY_LEVEL_NAME),
        md_date_st: date_at(doc, METADATA_DATE_STAMP),
        entity_type_label: text_at(doc, ENTITY_TYPE_LABEL),
        entity_type_definition: text_at(doc, ENTITY_TYPE_DEFINITION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feature_class::{HEADERS, NOT_AVAILABLE};

    const FULL: &str = r#"<metadata>
<Esri>
<CreaDate>20240115</CreaDate><CreaTime>09154500</CreaTime>
<ArcGISFormat>1.0</ArcGISFormat><SyncOnce>FALSE</SyncOnce>
<DataProperties><itemProps><itemName Sync="TRUE">GIS.ROADS</itemName></itemProps></DataProperties>
<SyncDate>20240116</SyncDate><SyncTime>10000000</SyncTime>
<ModDate>20240301</ModDate><ModTime>11302200</ModTime>
</Esri>
<idinfo><descript><purpose>Road centerlines</purpose><abstract>Maintained by public works, "weekly"</abstract></descript></idinfo>
<dataIdInfo><envirDesc>Esri ArcGIS 13.2</envirDesc></dataIdInfo>
<distInfo><distFormat><formatName>Enterprise Geodatabase Feature Class</formatName></distFormat></distInfo>
<mdHrLvName>dataset</mdHrLvName>
<mdDateSt>20240302</mdDateSt>
<eainfo><detailed><enttyp><enttypl>GIS.ROADS</enttypl><enttypt>Feature Class</enttypt></enttyp></detailed></eainfo>
</metadata>"#;

    #[test]
    fn test_full_document_fills_every_column() {
        let doc = MetadataDocument::parse(FULL).unwrap();
        let record = extract_record(&doc, "GIS.ROADS");
        let row = record.to_row();
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(
            row,
            vec![
                "GIS.ROADS",
                "01/15/2024",
                "Road centerlines",
                "Maintained by public works, \"weekly\"",
                "09154500",
                "1.0",
                "FALSE",
                "GIS.ROADS",
                "01/16/2024",
                "10000000",
                "03/01/2024",
                "11302200",
                "Esri ArcGIS 13.2",
                "Enterprise Geodatabase Feature Class",
                "dataset",
                "03/02/2024",
                "GIS.ROADS",
                "Feature Class",
            ]
        );
    }

    #[test]
    fn test_missing_paths_and_empty_description() {
        let doc = MetadataDocument::parse(
            "<metadata><idinfo><descript><abstract/></descript></idinfo></metadata>",
        )
        .unwrap();
        let record = extract_record(&doc, "parcels");
        assert_eq!(record.summary, None);
        assert_eq!(record.create_date, None);
        assert_eq!(record.description.as_deref(), Some(""));

        let row = record.to_row();
        assert_eq!(row[1], NOT_AVAILABLE);
        assert_eq!(row[2], NOT_AVAILABLE);
        assert_eq!(row[3], "");
    }

    #[test]
    fn test_bad_date_is_carried_as_text() {
        let doc =
            MetadataDocument::parse("<metadata><Esri><ModDate>2024-03-01</ModDate></Esri></metadata>")
                .unwrap();
        let record = extract_record(&doc, "roads");
        assert!(record.mod_date.unwrap().starts_with("Error:"));
    }

    #[test]
    fn test_empty_date_node_is_empty_not_error() {
        let doc =
            MetadataDocument::parse("<metadata><Esri><SyncDate></SyncDate></Esri></metadata>")
                .unwrap();
        let record = extract_record(&doc, "roads");
        assert_eq!(record.sync_date.as_deref(), Some(""));
        assert_eq!(record.mod_date, None);
    }

    #[test]
    fn test_literal_sentinel_text_stays_present() {
        let doc = MetadataDocument::parse("<metadata><mdHrLvName>N/A</mdHrLvName></metadata>")
            .unwrap();
        let record = extract_record(&doc, "roads");
        assert_eq!(record.md_hr_lv_name.as_deref(), Some("N/A"));
        assert_eq!(record.format_name, None);
    }
}
