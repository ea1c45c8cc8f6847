//! Filesystem implementation of MetadataStore

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{MetadataStore, ServiceError};

/// Reads `<root>/<feature class>.xml`
pub struct DirectoryMetadataStore {
    root: PathBuf,
}

impl DirectoryMetadataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MetadataStore for DirectoryMetadataStore {
    async fn export_metadata(&self, feature_class: &str) -> Result<Vec<u8>, ServiceError> {
        if feature_class.contains(['/', '\\']) || feature_class == ".." {
            return Err(ServiceError::NotFound(format!(
                "'{}' is not a feature class name",
                feature_class
            )));
        }

        let path = self.root.join(format!("{}.xml", feature_class));
        tokio::fs::read(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ServiceError::NotFound(format!(
                    "No metadata document at {}",
                    path.display()
                )),
                ErrorKind::PermissionDenied => ServiceError::Connectivity(format!(
                    "Permission denied reading {}",
                    path.display()
                )),
                ErrorKind::TimedOut | ErrorKind::Interrupted | ErrorKind::WouldBlock => {
                    ServiceError::Transient(format!("Reading {}: {}", path.display(), e))
                }
                _ => ServiceError::Unknown(format!("Reading {}: {}", path.display(), e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_document_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GIS.ROADS.xml"), "<metadata/>").unwrap();

        let store = DirectoryMetadataStore::new(dir.path());
        assert_eq!(store.export_metadata("GIS.ROADS").await.unwrap(), b"<metadata/>");
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryMetadataStore::new(dir.path());
        assert!(matches!(
            store.export_metadata("GIS.ROADS").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            store.export_metadata("../secrets").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
