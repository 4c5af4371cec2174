use serde::Serialize;
use std::path::Path;

/// What the idempotence gate found before a stage ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    NotStarted,
    Complete,
    /// The first output exists but fewer outputs than expected are on disk.
    Partial { present: usize, expected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum StageOutcome {
    Done { written: usize },
    Skipped { status: StageStatus },
}

impl StageStatus {
    /// Gate for a stage whose total output count is unknown up front.
    pub fn of_first_output(first: &Path) -> Self {
        if first.exists() {
            StageStatus::Complete
        } else {
            StageStatus::NotStarted
        }
    }

    /// Gate for a stage that should end with exactly `expected` outputs.
    pub fn of_sequence(first: &Path, present: usize, expected: usize) -> Self {
        if !first.exists() {
            StageStatus::NotStarted
        } else if present < expected {
            StageStatus::Partial { present, expected }
        } else {
            StageStatus::Complete
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, StageStatus::NotStarted)
    }
}
