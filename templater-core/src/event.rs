use crate::gh::SubmitResult;

/// Events that arrive from background work or timers.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The `gh pr create` call returned
    SubmissionFinished(SubmitResult),

    /// The grace period on the success screen ran out
    AutoExitElapsed,
}
