//! External service trait definitions
//!
//! These traits define the contract for the spatial database and its
//! metadata store. Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::ServiceError;

/// Result of describing one feature class
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureClassDescription {
    pub shape_type: String,
    /// `None` when the feature class has no spatial reference
    pub spatial_reference: Option<String>,
    pub is_versioned: bool,
    pub catalog_path: String,
    pub owner: Option<String>,
}

/// An open connection to a spatial workspace
#[async_trait]
pub trait SpatialWorkspace: Send + Sync {
    /// Names of the feature datasets, in the order the service reports them
    async fn list_datasets(&self) -> Result<Vec<String>, ServiceError>;

    /// Feature classes inside `dataset`, or outside any dataset when `None`
    async fn list_feature_classes(
        &self,
        dataset: Option<&str>,
    ) -> Result<Vec<String>, ServiceError>;

    /// Describe a feature class within the given context
    async fn describe(
        &self,
        dataset: Option<&str>,
        feature_class: &str,
    ) -> Result<FeatureClassDescription, ServiceError>;
}

/// Source of catalog metadata documents
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Materialize the metadata document of a feature class as raw XML bytes,
    /// still in whatever encoding the document declares
    async fn export_metadata(&self, feature_class: &str) -> Result<Vec<u8>, ServiceError>;
}
