use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("failed to read model artifact {path}: {source}")]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path} is not valid JSON: {source}")]
    ModelFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact is incompatible: {0}")]
    ModelShape(String),

    #[error("invalid {field} code {code}")]
    UnknownCode { field: &'static str, code: i64 },

    #[error("invalid {field} label '{label}'")]
    UnknownLabel { field: &'static str, label: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing value for {0}")]
    MissingField(&'static str),

    #[error("unknown priority '{0}'")]
    UnknownPriority(String),

    #[error("model produced a non-finite prediction ({0})")]
    NonFinitePrediction(f64),

    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<AdvisorError>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_errors_carry_the_row_number() {
        let err = AdvisorError::Row {
            row: 4,
            source: Box::new(AdvisorError::UnknownCode {
                field: "ParentalSupport",
                code: 9,
            }),
        };
        assert_eq!(err.to_string(), "row 4: invalid ParentalSupport code 9");
    }

    #[test]
    fn range_errors_name_the_field() {
        let err = AdvisorError::OutOfRange {
            field: "Age",
            min: 15.0,
            max: 18.0,
            value: 21.0,
        };
        assert_eq!(err.to_string(), "Age must be between 15 and 18, got 21");
    }
}
