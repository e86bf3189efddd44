use business::domain::cart::notifier::CartNotifier;
use business::domain::cart::outcome::MutationOutcome;

/// Prints each reported outcome as a one-line toast.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn toast(outcome: &MutationOutcome) -> Option<String> {
        let text = match outcome {
            MutationOutcome::Updated(line) => format!(
                "\"{}\" quantity set to {}",
                line.product_name, line.quantity
            ),
            MutationOutcome::Removed(line_id) => format!("line {} removed", line_id),
            MutationOutcome::Cleared => "cart cleared".to_string(),
            MutationOutcome::Rejected(error) | MutationOutcome::RolledBack(error) => {
                error.message()
            }
            MutationOutcome::Superseded | MutationOutcome::Cancelled => return None,
        };
        let level = if outcome.is_success() { "ok" } else { "error" };
        Some(format!("{}: {}", level, text))
    }
}

impl CartNotifier for ConsoleNotifier {
    fn notify(&self, outcome: &MutationOutcome) {
        if let Some(text) = Self::toast(outcome) {
            println!("{}", text);
        }
    }
}
