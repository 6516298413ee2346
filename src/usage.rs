use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::predictor::PREDICTION_MARKER;

/// Number of predictions recorded in the log. Advisory only: unreadable or
/// missing logs count as zero, and concurrent writers are not coordinated.
pub fn count_predictions(log_path: &Path) -> usize {
    let Ok(file) = std::fs::File::open(log_path) else {
        return 0;
    };
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter(|line| line.contains(PREDICTION_MARKER))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_marked_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(
            &path,
            "2026-01-01 10:00:00 - INFO - App started\n\
             2026-01-01 10:00:01 - INFO - Prediction made: 3.120 (B) in 0.02ms\n\
             2026-01-01 10:00:05 - ERROR - Prediction failed: bad input\n\
             2026-01-01 10:00:09 - INFO - Prediction made: 1.870 (F) in 0.01ms\n",
        )
        .unwrap();
        assert_eq!(count_predictions(&path), 2);
    }

    #[test]
    fn missing_log_counts_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_predictions(&dir.path().join("nope.log")), 0);
    }

    #[test]
    fn directory_instead_of_file_counts_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_predictions(dir.path()), 0);
    }
}
