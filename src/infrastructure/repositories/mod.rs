//! Adapters for the external spatial services

pub mod directory_metadata_store;
pub mod http_metadata_store;
pub mod manifest_workspace;

pub use directory_metadata_store::DirectoryMetadataStore;
pub use http_metadata_store::HttpMetadataStore;
pub use manifest_workspace::ManifestWorkspace;
