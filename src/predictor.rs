use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info};
use serde::Deserialize;

use crate::advice;
use crate::error::{AdvisorError, Result};
use crate::models::{Advice, FeatureField, PredictionResult, StudentFeatures, FEATURE_COUNT};

/// Marker consumed by the usage counter.
pub const PREDICTION_MARKER: &str = "Prediction made:";

pub trait Regressor {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64;
}

/// Linear regression weights exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AdvisorError::ModelIo {
            path: path.to_path_buf(),
            source,
        })?;
        let model: LinearModel =
            serde_json::from_str(&raw).map_err(|source| AdvisorError::ModelFormat {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(AdvisorError::ModelShape(format!(
                "expected {FEATURE_COUNT} coefficients, found {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AdvisorError::ModelShape(
                "weights must be finite numbers".to_string(),
            ));
        }
        if let Some(names) = &self.feature_names {
            let expected: Vec<&str> = FeatureField::ALL.iter().map(|f| f.name()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(AdvisorError::ModelShape(format!(
                    "feature order {names:?} does not match {expected:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// Process-wide state: the loaded model and the log file it reports to.
///
/// Built once in `main` after logging is initialised and passed by reference
/// to every command. Nothing in it is mutated after construction.
pub struct AppContext {
    model: Box<dyn Regressor>,
    log_path: PathBuf,
}

impl AppContext {
    pub fn load(model_path: &Path, log_path: PathBuf) -> Result<Self> {
        match LinearModel::load(model_path) {
            Ok(model) => {
                info!("[+] Model loaded successfully from {}", model_path.display());
                Ok(Self::with_model(Box::new(model), log_path))
            }
            Err(err) => {
                error!("[-] Error loading model: {err}");
                Err(err)
            }
        }
    }

    pub fn with_model(model: Box<dyn Regressor>, log_path: PathBuf) -> Self {
        Self { model, log_path }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn predict(&self, student: &StudentFeatures) -> Result<PredictionResult> {
        let started = Instant::now();
        let gpa = self.model.predict(&student.to_vector());
        if !gpa.is_finite() {
            error!("Prediction failed for {student:?}: non-finite output {gpa}");
            return Err(AdvisorError::NonFinitePrediction(gpa));
        }
        let result = PredictionResult::new(gpa);
        info!(
            "{PREDICTION_MARKER} {:.3} ({}) in {:.2}ms",
            result.gpa,
            result.grade_label,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(result)
    }

    pub fn advise(&self, student: &StudentFeatures) -> Result<Advice> {
        let prediction = self.predict(student)?;
        Ok(advice::advise(student, prediction))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Returns a fixed GPA regardless of input.
    pub struct FixedModel(pub f64);

    impl Regressor for FixedModel {
        fn predict(&self, _features: &[f64; FEATURE_COUNT]) -> f64 {
            self.0
        }
    }

    pub fn context(gpa: f64) -> AppContext {
        AppContext::with_model(Box::new(FixedModel(gpa)), PathBuf::from("unused.log"))
    }
}
