use serde::{Serialize, Serializer};

/// Dataset label used for feature classes that live outside any feature dataset.
pub const ROOT_DATASET: &str = "ROOT";

/// Spatial reference label used when a feature class has none.
pub const UNKNOWN_SPATIAL_REFERENCE: &str = "Unknown";

/// One row of the feature class inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "FeatureDataset")]
    pub feature_dataset: String,
    #[serde(rename = "FeatureClass")]
    pub feature_class: String,
    #[serde(rename = "GeometryType")]
    pub geometry_type: String,
    #[serde(rename = "SpatialReference")]
    pub spatial_reference: String,
    #[serde(rename = "IsVersioned", serialize_with = "title_case_bool")]
    pub is_versioned: bool,
    #[serde(rename = "CatalogPath")]
    pub catalog_path: String,
    /// Known to the description but never written to the report
    #[serde(skip)]
    pub owner: Option<String>,
}

fn title_case_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}
