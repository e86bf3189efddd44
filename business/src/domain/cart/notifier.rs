use super::outcome::MutationOutcome;

/// Port through which resolved outcomes reach the user (toast, status line, ...).
pub trait CartNotifier: Send + Sync {
    fn notify(&self, outcome: &MutationOutcome);
}
