use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::DomainError;
use crate::modules::import::DEFAULT_FEATURE_COLUMN;

/// What the harvester does when its input CSV or column is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingInputPolicy {
    /// Log the problem and harvest zero feature classes
    #[default]
    Empty,
    /// Abort the harvest with an error
    Fail,
}

/// Where metadata documents are fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataSource {
    /// Per-feature-class XML files; `None` uses the workspace's own directory
    Directory(Option<PathBuf>),
    /// HTTP endpoint; `{name}` in the template is replaced by the feature class
    Http {
        url_template: String,
        timeout: Duration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarvestSettings {
    pub input_csv: PathBuf,
    pub feature_column: String,
    pub output_csv: PathBuf,
    /// When set, every fetched document is also saved here
    pub xml_archive_dir: Option<PathBuf>,
    pub include_index: bool,
    pub missing_input: MissingInputPolicy,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from("all_feature_classes.csv"),
            feature_column: DEFAULT_FEATURE_COLUMN.to_string(),
            output_csv: PathBuf::from("outputs/results.csv"),
            xml_archive_dir: None,
            include_index: false,
            missing_input: MissingInputPolicy::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Connection descriptor of the spatial workspace
    pub connection: PathBuf,
    pub inventory_csv: PathBuf,
    pub metadata: MetadataSource,
    pub harvest: HarvestSettings,
}

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

fn flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "false" | "0" | "no"))
}

fn http_timeout() -> Result<Duration, DomainError> {
    match env::var("GEOCATALOG_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw.trim().parse().map(Duration::from_secs).map_err(|_| {
            DomainError::Config(format!(
                "GEOCATALOG_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                raw
            ))
        }),
        Err(_) => Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
    }
}

impl Config {
    /// Read the configuration from `GEOCATALOG_*` variables.
    ///
    /// Unset variables take their defaults; a value that is set but cannot
    /// be understood is a `DomainError::Config`.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = HarvestSettings::default();

        let missing_input = match env::var("GEOCATALOG_MISSING_INPUT").ok().as_deref() {
            None | Some("empty") => MissingInputPolicy::Empty,
            Some("fail") => MissingInputPolicy::Fail,
            Some(other) => {
                return Err(DomainError::Config(format!(
                    "GEOCATALOG_MISSING_INPUT must be 'empty' or 'fail', got '{}'",
                    other
                )));
            }
        };

        let metadata = match env::var("GEOCATALOG_METADATA_URL") {
            Ok(url_template) if !url_template.trim().is_empty() => MetadataSource::Http {
                url_template,
                timeout: http_timeout()?,
            },
            _ => MetadataSource::Directory(env::var("GEOCATALOG_METADATA_DIR").ok().map(PathBuf::from)),
        };

        Ok(Self {
            connection: env::var("GEOCATALOG_CONNECTION")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("workspace.json")),
            inventory_csv: env::var("GEOCATALOG_INVENTORY_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("outputs/feature_classes.csv")),
            metadata,
            harvest: HarvestSettings {
                input_csv: env::var("GEOCATALOG_INPUT_CSV")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.input_csv),
                feature_column: env::var("GEOCATALOG_FEATURE_COLUMN")
                    .unwrap_or(defaults.feature_column),
                output_csv: env::var("GEOCATALOG_OUTPUT_CSV")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.output_csv),
                xml_archive_dir: env::var("GEOCATALOG_XML_ARCHIVE_DIR").ok().map(PathBuf::from),
                include_index: flag("GEOCATALOG_INDEX_COLUMN").unwrap_or(defaults.include_index),
                missing_input,
            },
        })
    }
}
