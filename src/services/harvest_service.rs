//! Harvest Service - catalog metadata for a list of feature classes
//!
//! Identifiers are read from the input CSV, sorted, and processed one at a
//! time. Each document lives in its own in-memory buffer for the duration of
//! one iteration; nothing is shared between iterations.

use std::path::{Path, PathBuf};

use crate::domain::{DomainError, MetadataStore};
use crate::infrastructure::config::{HarvestSettings, MissingInputPolicy};
use crate::models::FeatureClassRecord;
use crate::modules::export::write_harvest_report;
use crate::modules::import::read_feature_class_list;
use crate::modules::metadata::{MetadataDocument, extract_record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub rows_written: usize,
    /// Feature classes written with every field unavailable
    pub degraded: Vec<String>,
    pub output: PathBuf,
}

/// Read and sort the identifiers, applying the missing-input policy.
pub fn load_identifiers(settings: &HarvestSettings) -> Result<Vec<String>, DomainError> {
    match read_feature_class_list(&settings.input_csv, &settings.feature_column) {
        Ok(mut identifiers) => {
            identifiers.sort();
            Ok(identifiers)
        }
        Err(DomainError::MissingInput(msg))
            if settings.missing_input == MissingInputPolicy::Empty =>
        {
            tracing::warn!("{} Continuing with no feature classes.", msg);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// File name used when archiving the document of `feature_class`.
pub fn archive_file_name(feature_class: &str) -> String {
    let base = Path::new(feature_class)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| feature_class.to_string());
    format!("{}.xml", base.replace('.', "_"))
}

/// Fetch, optionally archive, parse and map the document of one feature class.
pub async fn harvest_record<M: MetadataStore + ?Sized>(
    store: &M,
    feature_class: &str,
    archive_dir: Option<&Path>,
) -> Result<FeatureClassRecord, DomainError> {
    let bytes = store.export_metadata(feature_class).await?;

    // Archived as fetched, before decoding
    if let Some(dir) = archive_dir {
        tokio::fs::write(dir.join(archive_file_name(feature_class)), &bytes).await?;
    }

    let doc = MetadataDocument::from_bytes(&bytes)?;
    Ok(extract_record(&doc, feature_class))
}

pub async fn run_harvest<M: MetadataStore + ?Sized>(
    settings: &HarvestSettings,
    store: &M,
) -> Result<HarvestSummary, DomainError> {
    tracing::info!("Harvest started");

    let identifiers = load_identifiers(settings)?;
    tracing::info!("Found {} Feature Classes", identifiers.len());

    if let Some(dir) = &settings.xml_archive_dir {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut records = Vec::with_capacity(identifiers.len());
    let mut degraded = Vec::new();

    for feature_class in &identifiers {
        tracing::debug!("Harvesting {}", feature_class);

        match harvest_record(store, feature_class, settings.xml_archive_dir.as_deref()).await {
            Ok(record) => records.push(record),
            Err(DomainError::Service(e)) if e.is_recoverable() => {
                tracing::warn!("{}: {}; writing N/A row", feature_class, e);
                degraded.push(feature_class.clone());
                records.push(FeatureClassRecord::unavailable(feature_class.as_str()));
            }
            Err(DomainError::Parse(msg)) => {
                tracing::warn!("{}: unreadable metadata ({}); writing N/A row", feature_class, msg);
                degraded.push(feature_class.clone());
                records.push(FeatureClassRecord::unavailable(feature_class.as_str()));
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Finished harvesting, writing {} rows", records.len());
    write_harvest_report(&settings.output_csv, &records, settings.include_index)?;
    tracing::info!(
        "Successfully saved results to {}",
        settings.output_csv.display()
    );

    Ok(HarvestSummary {
        rows_written: records.len(),
        degraded,
        output: settings.output_csv.clone(),
    })
}
