//! Non-fatal warnings surfaced to the user.
//!
//! Nothing in here stops a command from succeeding. Warnings are collected
//! by the store (or computed from its size) and printed after the command's
//! normal output.

/// Number of decisions above which search and persistence may slow down.
pub const DECISION_WARNING_THRESHOLD: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Persisting the collection failed even after retrying.
    PersistFailed {
        key: String,
        attempts: u32,
        message: String,
    },
    /// Decision count exceeds the recommended threshold.
    HighDecisionCount { count: usize, threshold: usize },
}

/// Check the collection size and return any warnings.
pub fn check_thresholds(count: usize) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if count > DECISION_WARNING_THRESHOLD {
        warnings.push(Warning::HighDecisionCount {
            count,
            threshold: DECISION_WARNING_THRESHOLD,
        });
    }

    warnings
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::PersistFailed {
            key,
            attempts,
            message,
        } => {
            format!(
                "Warning: could not save '{}' after {} attempts ({}) - changes are not persisted",
                key, attempts, message
            )
        }
        Warning::HighDecisionCount { count, threshold } => {
            format!(
                "Warning: {} decisions exceeds recommended {} - search may slow down",
                count, threshold
            )
        }
    }
}
