//! Domain error types
//!
//! `ServiceError` classifies failures reported by the external spatial
//! services (workspace connection, metadata store). `DomainError` is what the
//! jobs return and adds the local failure classes on top.

use std::fmt;

/// Failure reported at an external service boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Connection descriptor missing, connection refused or credentials rejected
    Connectivity(String),
    /// The requested dataset, feature class or document does not exist
    NotFound(String),
    /// Timeout or temporary unavailability; not retried
    Transient(String),
    /// Anything the adapter could not classify
    Unknown(String),
}

impl ServiceError {
    /// Whether a harvest may degrade the current record and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ServiceError::NotFound(_) | ServiceError::Transient(_))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Connectivity(msg) => write!(f, "Connectivity error: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::Transient(msg) => write!(f, "Transient service error: {}", msg),
            ServiceError::Unknown(msg) => write!(f, "Unexpected service error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug)]
pub enum DomainError {
    /// External service failure
    Service(ServiceError),
    /// Input CSV or its identifier column is missing
    MissingInput(String),
    /// Malformed XML, CSV or manifest content
    Parse(String),
    /// Local filesystem error
    Io(String),
    /// Invalid configuration value
    Config(String),
}

impl DomainError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, DomainError::Service(ServiceError::Connectivity(_)))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Service(e) => write!(f, "{}", e),
            DomainError::MissingInput(msg) => write!(f, "Missing input: {}", msg),
            DomainError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DomainError::Io(msg) => write!(f, "IO error: {}", msg),
            DomainError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<ServiceError> for DomainError {
    fn from(e: ServiceError) -> Self {
        DomainError::Service(e)
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

impl From<csv::Error> for DomainError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            DomainError::Io(e.to_string())
        } else {
            DomainError::Parse(format!("CSV: {}", e))
        }
    }
}

impl From<quick_xml::Error> for DomainError {
    fn from(e: quick_xml::Error) -> Self {
        DomainError::Parse(format!("XML: {}", e))
    }
}
