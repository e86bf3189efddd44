use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use business::domain::cart::confirmation::{ConfirmationGate, ConfirmationRequest};

/// Asks on stdin, or answers yes when started with `--yes`.
pub struct StdinConfirmation {
    pub assume_yes: bool,
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl ConfirmationGate for StdinConfirmation {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool {
        if self.assume_yes {
            return true;
        }

        let prompt = request.prompt();
        let answer = tokio::task::spawn_blocking(move || {
            print!("{} [y/N] ", prompt);
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok::<_, io::Error>(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::LineId;

    #[test]
    fn should_accept_only_explicit_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[tokio::test]
    async fn should_skip_prompt_when_assuming_yes() {
        let gate = StdinConfirmation { assume_yes: true };
        let request = ConfirmationRequest::RemoveLine {
            line_id: LineId::new(1),
            product_name: "Dune".to_string(),
        };

        assert!(gate.confirm(&request).await);
    }
}
