//! Exit code logic for the vplan process.
//!
//! Single responsibility: map a run outcome to the process exit outcome.

use vplan_core::RunOutcome;

use crate::ProcessExit;

/// Determines the process exit outcome from a run outcome.
pub(crate) fn determine_exit_outcome(outcome: &RunOutcome) -> ProcessExit {
    match outcome {
        RunOutcome::PageUnavailable { .. } | RunOutcome::ParseFailed { .. } => {
            ProcessExit::Failure
        }
        RunOutcome::NoDocumentsFound => ProcessExit::Success,
        RunOutcome::Finished {
            cancelled: true, ..
        } => ProcessExit::Failure,
        RunOutcome::Finished {
            succeeded, failed, ..
        } => {
            if *failed == 0 {
                ProcessExit::Success
            } else if *succeeded > 0 {
                ProcessExit::Partial
            } else {
                ProcessExit::Failure
            }
        }
    }
}
