pub mod dataset;
pub mod debounce;
pub mod display;
pub mod geometry;
pub mod search;
pub mod session;
pub mod settings;
pub mod speed;

use std::path::PathBuf;
use thiserror::Error;

pub use dataset::{AircraftRecord, Dataset, DatasetError, Field};
pub use session::Session;
pub use settings::Settings;
pub use speed::TakeoffEstimate;

#[derive(Error, Debug)]
pub enum TakeoffError {
    #[error("No aircraft dataset configured; pass --dataset or set dataset_path in settings")]
    DatasetNotConfigured,
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Directory holding `settings.json`.
/// Falls back to the working directory when no home directory can be resolved.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "takeoff", "Takeoff-Estimator")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Picks the dataset to open: an explicit path wins over the one stored in settings.
pub fn resolve_dataset_path(
    explicit: Option<PathBuf>,
    settings: &Settings,
) -> Result<PathBuf, TakeoffError> {
    explicit
        .or_else(|| settings.dataset_path.clone())
        .ok_or(TakeoffError::DatasetNotConfigured)
}

/// Resolves and loads the dataset in one step.
pub fn open_dataset(explicit: Option<PathBuf>, settings: &Settings) -> Result<Dataset, TakeoffError> {
    let path = resolve_dataset_path(explicit, settings)?;
    Ok(Dataset::load_csv(path)?)
}
