//! Inventory Service - lists every feature class reachable from a workspace
//!
//! Named feature datasets are visited first in the order the service reports
//! them, then the root context, which is always checked so feature classes
//! outside any dataset are included. Nothing is de-duplicated.

use std::path::Path;

use crate::domain::{DomainError, SpatialWorkspace};
use crate::models::CatalogEntry;
use crate::models::catalog_entry::{ROOT_DATASET, UNKNOWN_SPATIAL_REFERENCE};
use crate::modules::export::write_inventory_report;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    /// Distinct dataset labels among the written rows, `ROOT` included
    pub datasets: usize,
    pub rows_written: usize,
}

/// Describe every feature class in every dataset context.
pub async fn collect_inventory<W: SpatialWorkspace + ?Sized>(
    workspace: &W,
) -> Result<Vec<CatalogEntry>, DomainError> {
    let mut contexts: Vec<Option<String>> = workspace
        .list_datasets()
        .await?
        .into_iter()
        .map(Some)
        .collect();
    contexts.push(None);

    let mut entries = Vec::new();
    for dataset in &contexts {
        let dataset = dataset.as_deref();
        let feature_classes = workspace.list_feature_classes(dataset).await?;
        tracing::debug!(
            "{}: {} feature classes",
            dataset.unwrap_or(ROOT_DATASET),
            feature_classes.len()
        );

        for feature_class in feature_classes {
            let desc = workspace.describe(dataset, &feature_class).await?;
            entries.push(CatalogEntry {
                feature_dataset: dataset.unwrap_or(ROOT_DATASET).to_string(),
                feature_class,
                geometry_type: desc.shape_type,
                spatial_reference: desc
                    .spatial_reference
                    .unwrap_or_else(|| UNKNOWN_SPATIAL_REFERENCE.to_string()),
                is_versioned: desc.is_versioned,
                catalog_path: desc.catalog_path,
                owner: desc.owner,
            });
        }
    }

    Ok(entries)
}

/// Collect the inventory and write it to `output`.
pub async fn run_inventory<W: SpatialWorkspace + ?Sized>(
    workspace: &W,
    output: &Path,
) -> Result<InventorySummary, DomainError> {
    tracing::info!("Inventory started");
    let entries = collect_inventory(workspace).await?;
    let datasets = {
        let mut names: Vec<&str> = entries.iter().map(|e| e.feature_dataset.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    };

    write_inventory_report(output, &entries)?;
    tracing::info!("Feature class inventory written to: {}", output.display());
    tracing::info!("Total feature classes found: {}", entries.len());

    Ok(InventorySummary {
        datasets,
        rows_written: entries.len(),
    })
}
