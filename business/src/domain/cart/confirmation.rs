use async_trait::async_trait;

use crate::domain::shared::value_objects::LineId;

/// What the user is asked to confirm before a destructive change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    RemoveLine {
        line_id: LineId,
        product_name: String,
    },
    ClearCart {
        line_count: usize,
    },
}

impl ConfirmationRequest {
    pub fn prompt(&self) -> String {
        match self {
            ConfirmationRequest::RemoveLine { product_name, .. } => {
                format!("Remove \"{}\" from your cart?", product_name)
            }
            ConfirmationRequest::ClearCart { line_count } => {
                format!("Remove all {} items from your cart?", line_count)
            }
        }
    }
}

/// Port for the confirm-then-proceed dialog gating removals.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_product_in_remove_prompt() {
        let request = ConfirmationRequest::RemoveLine {
            line_id: LineId::new(3),
            product_name: "Dune".to_string(),
        };

        assert_eq!(request.prompt(), "Remove \"Dune\" from your cart?");
    }

    #[test]
    fn should_count_lines_in_clear_prompt() {
        let request = ConfirmationRequest::ClearCart { line_count: 4 };

        assert_eq!(request.prompt(), "Remove all 4 items from your cart?");
    }
}
