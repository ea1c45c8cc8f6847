//! Connection state shared by the jobs

use std::sync::Arc;

use crate::domain::{DomainError, MetadataStore, SpatialWorkspace};
use crate::infrastructure::config::{Config, MetadataSource};
use crate::infrastructure::{DirectoryMetadataStore, HttpMetadataStore, ManifestWorkspace};

/// Open workspace plus the metadata store configured for it
#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<dyn SpatialWorkspace>,
    pub metadata_store: Arc<dyn MetadataStore>,
}

impl AppState {
    pub fn new(workspace: Arc<dyn SpatialWorkspace>, metadata_store: Arc<dyn MetadataStore>) -> Self {
        Self {
            workspace,
            metadata_store,
        }
    }

    /// Open the workspace named by the connection descriptor.
    ///
    /// Fails with `ServiceError::Connectivity` when the descriptor is missing
    /// or rejected, and with `DomainError::Config` when the metadata source is
    /// misconfigured, before any job work happens.
    pub async fn connect(config: &Config) -> Result<Self, DomainError> {
        let workspace = ManifestWorkspace::open(&config.connection).await?;
        tracing::info!("Connected to workspace {}", workspace.descriptor().display());

        let metadata_store: Arc<dyn MetadataStore> = match &config.metadata {
            MetadataSource::Directory(Some(dir)) => Arc::new(DirectoryMetadataStore::new(dir)),
            MetadataSource::Directory(None) => {
                Arc::new(DirectoryMetadataStore::new(workspace.metadata_dir()))
            }
            MetadataSource::Http {
                url_template,
                timeout,
            } => Arc::new(HttpMetadataStore::new(url_template.clone(), *timeout)?),
        };

        Ok(Self::new(Arc::new(workspace), metadata_store))
    }
}
