pub mod catalog_entry;
pub mod feature_class;

pub use catalog_entry::CatalogEntry;
pub use feature_class::FeatureClassRecord;
