//! Startup loading of the trained artifacts
//!
//! Artifacts are read once before serving begins and shared as read-only
//! trait objects afterwards; no teardown is required.

use crate::artifact::{LogisticModel, TabularPreprocessor};
use crate::collaborator::{Classifier, Preprocessor};
use riskserve_core::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// File name of the exported preprocessor parameters
pub const PREPROCESSOR_FILE: &str = "preprocessor.json";

/// File name of the exported classifier parameters
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Load both artifacts from a models directory
pub fn load_artifacts(dir: &Path) -> Result<(Arc<dyn Preprocessor>, Arc<dyn Classifier>)> {
    let preprocessor: TabularPreprocessor = read_json(&dir.join(PREPROCESSOR_FILE))?;
    preprocessor.validate()?;

    let classifier: LogisticModel = read_json(&dir.join(CLASSIFIER_FILE))?;
    if classifier.width() != preprocessor.width() {
        return Err(Error::config(format!(
            "classifier expects {} encoded features but the preprocessor produces {}",
            classifier.width(),
            preprocessor.width()
        )));
    }

    info!(
        models_dir = %dir.display(),
        encoded_width = preprocessor.width(),
        "trained artifacts loaded"
    );

    Ok((Arc::new(preprocessor), Arc::new(classifier)))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("cannot parse {}: {e}", path.display())))
}
