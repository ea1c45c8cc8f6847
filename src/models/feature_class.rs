/// Written in place of any field whose document node was absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column headers of the harvest report, in output order.
pub const HEADERS: [&str; 18] = [
    "Feature Set",
    "create_date",
    "Summary",
    "Description",
    "create_time",
    "arcgis_format",
    "sync_once",
    "item_name",
    "sync_date",
    "sync_time",
    "mod_date",
    "mod_time",
    "envir_desc",
    "format_name",
    "mdhrlvname",
    "mdDateSt",
    "enttypl",
    "enttypt",
];

/// Metadata harvested for one feature class.
///
/// `None` means the document had no node at that path. The sentinel is only
/// substituted in [`FeatureClassRecord::to_row`], so a document whose text
/// really is `"N/A"` stays distinguishable in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureClassRecord {
    pub feature_set: String,
    pub create_date: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub create_time: Option<String>,
    pub arcgis_format: Option<String>,
    pub sync_once: Option<String>,
    pub item_name: Option<String>,
    pub sync_date: Option<String>,
    pub sync_time: Option<String>,
    pub mod_date: Option<String>,
    pub mod_time: Option<String>,
    pub envir_desc: Option<String>,
    pub format_name: Option<String>,
    pub md_hr_lv_name: Option<String>,
    pub md_date_st: Option<String>,
    pub entity_type_label: Option<String>,
    pub entity_type_definition: Option<String>,
}

impl FeatureClassRecord {
    /// A record for a feature class whose document could not be read.
    pub fn unavailable(feature_set: impl Into<String>) -> Self {
        Self {
            feature_set: feature_set.into(),
            ..Default::default()
        }
    }

    /// Document-derived fields in column order, after the feature set.
    pub fn fields(&self) -> [&Option<String>; 17] {
        [
            &self.create_date,
            &self.summary,
            &self.description,
            &self.create_time,
            &self.arcgis_format,
            &self.sync_once,
            &self.item_name,
            &self.sync_date,
            &self.sync_time,
            &self.mod_date,
            &self.mod_time,
            &self.envir_desc,
            &self.format_name,
            &self.md_hr_lv_name,
            &self.md_date_st,
            &self.entity_type_label,
            &self.entity_type_definition,
        ]
    }

    /// Serialized row matching [`HEADERS`], with absent fields as `"N/A"`.
    pub fn to_row(&self) -> Vec<&str> {
        let mut row = Vec::with_capacity(HEADERS.len());
        row.push(self.feature_set.as_str());
        row.extend(
            self.fields()
                .into_iter()
                .map(|field| field.as_deref().unwrap_or(NOT_AVAILABLE)),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_record_is_all_sentinels() {
        let record = FeatureClassRecord::unavailable("GIS.ROADS");
        let row = record.to_row();
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[0], "GIS.ROADS");
        assert!(row[1..].iter().all(|v| *v == NOT_AVAILABLE));
    }

    #[test]
    fn test_empty_text_is_not_the_sentinel() {
        let record = FeatureClassRecord {
            feature_set: "parcels".to_string(),
            description: Some(String::new()),
            ..Default::default()
        };
        let row = record.to_row();
        assert_eq!(row[2], NOT_AVAILABLE);
        assert_eq!(row[3], "");
    }
}
