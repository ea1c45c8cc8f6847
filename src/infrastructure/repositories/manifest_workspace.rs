//! Workspace connection backed by a JSON manifest
//!
//! The connection descriptor is a JSON file describing the workspace the way
//! a geodatabase catalog would list it:
//!
//! ```json
//! {
//!   "datasets": [
//!     { "name": "Hydro", "feature_classes": [
//!       { "name": "GIS.Rivers", "shape_type": "Polyline",
//!         "spatial_reference": "NAD_1983_StatePlane", "is_versioned": true }
//!     ] }
//!   ],
//!   "feature_classes": [ { "name": "GIS.Parcels", "shape_type": "Polygon" } ],
//!   "metadata_dir": "metadata"
//! }
//! ```
//!
//! Top-level `feature_classes` live outside any feature dataset.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{FeatureClassDescription, ServiceError, SpatialWorkspace};

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    datasets: Vec<DatasetEntry>,
    #[serde(default)]
    feature_classes: Vec<FeatureClassEntry>,
    metadata_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DatasetEntry {
    name: String,
    #[serde(default)]
    feature_classes: Vec<FeatureClassEntry>,
}

#[derive(Debug, Deserialize)]
struct FeatureClassEntry {
    name: String,
    shape_type: String,
    spatial_reference: Option<String>,
    #[serde(default)]
    is_versioned: bool,
    owner: Option<String>,
}

/// Manifest-based implementation of SpatialWorkspace
pub struct ManifestWorkspace {
    descriptor: PathBuf,
    manifest: Manifest,
    metadata_dir: PathBuf,
}

impl ManifestWorkspace {
    /// Check the connection descriptor exists and load it.
    pub async fn open(descriptor: &Path) -> Result<Self, ServiceError> {
        let content = tokio::fs::read_to_string(descriptor)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ServiceError::Connectivity(format!(
                    "Connection file not found at: {}",
                    descriptor.display()
                )),
                _ => ServiceError::Connectivity(format!(
                    "Could not read connection file {}: {}",
                    descriptor.display(),
                    e
                )),
            })?;

        Self::from_manifest_str(descriptor, &content)
    }

    fn from_manifest_str(descriptor: &Path, content: &str) -> Result<Self, ServiceError> {
        let manifest: Manifest = serde_json::from_str(content).map_err(|e| {
            ServiceError::Connectivity(format!(
                "Workspace rejected connection {}: {}",
                descriptor.display(),
                e
            ))
        })?;

        let base = descriptor.parent().unwrap_or_else(|| Path::new(""));
        let metadata_dir = match &manifest.metadata_dir {
            Some(dir) => base.join(dir),
            None => base.join("metadata"),
        };

        tracing::debug!(
            "Opened workspace {} ({} datasets, {} root feature classes)",
            descriptor.display(),
            manifest.datasets.len(),
            manifest.feature_classes.len()
        );

        Ok(Self {
            descriptor: descriptor.to_path_buf(),
            manifest,
            metadata_dir,
        })
    }

    pub fn descriptor(&self) -> &Path {
        &self.descriptor
    }

    /// Directory holding one `<feature class>.xml` document per feature class
    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    fn context(&self, dataset: Option<&str>) -> Result<&[FeatureClassEntry], ServiceError> {
        match dataset {
            None => Ok(&self.manifest.feature_classes),
            Some(name) => self
                .manifest
                .datasets
                .iter()
                .find(|d| d.name == name)
                .map(|d| d.feature_classes.as_slice())
                .ok_or_else(|| ServiceError::NotFound(format!("Feature dataset '{}'", name))),
        }
    }

    fn catalog_path(&self, dataset: Option<&str>, feature_class: &str) -> String {
        let mut path = self.descriptor.clone();
        if let Some(dataset) = dataset {
            path.push(dataset);
        }
        path.push(feature_class);
        path.display().to_string()
    }
}

#[async_trait]
impl SpatialWorkspace for ManifestWorkspace {
    async fn list_datasets(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .manifest
            .datasets
            .iter()
            .map(|d| d.name.clone())
            .collect())
    }

    async fn list_feature_classes(
        &self,
        dataset: Option<&str>,
    ) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .context(dataset)?
            .iter()
            .map(|fc| fc.name.clone())
            .collect())
    }

    async fn describe(
        &self,
        dataset: Option<&str>,
        feature_class: &str,
    ) -> Result<FeatureClassDescription, ServiceError> {
        let entry = self
            .context(dataset)?
            .iter()
            .find(|fc| fc.name == feature_class)
            .ok_or_else(|| ServiceError::NotFound(format!("Feature class '{}'", feature_class)))?;

        Ok(FeatureClassDescription {
            shape_type: entry.shape_type.clone(),
            spatial_reference: entry.spatial_reference.clone(),
            is_versioned: entry.is_versioned,
            catalog_path: self.catalog_path(dataset, feature_class),
            owner: entry.owner.clone(),
        })
    }
}
