use std::sync::Arc;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::select::{
    SelectLinesParams, SelectLinesUseCase, SelectionTarget,
};
use crate::domain::logger::Logger;

pub struct SelectLinesUseCaseImpl {
    pub store: Arc<CartStore>,
    pub logger: Arc<dyn Logger>,
}

impl SelectLinesUseCase for SelectLinesUseCaseImpl {
    fn execute(&self, params: SelectLinesParams) -> Result<CartSummary, CartError> {
        match params.target {
            SelectionTarget::Line(line_id) => {
                self.store.set_selected(line_id, params.selected)?;
                self.logger.debug(&format!(
                    "Line {} selected: {}",
                    line_id, params.selected
                ));
            }
            SelectionTarget::All => {
                self.store.select_all(params.selected);
                self.logger
                    .debug(&format!("All lines selected: {}", params.selected));
            }
        }
        Ok(self.store.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::CartLine;
    use crate::domain::shared::value_objects::{LineId, ProductId};
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn use_case() -> SelectLinesUseCaseImpl {
        let store = Arc::new(CartStore::new());
        let lines = [(1, 2, 10), (2, 1, 25)]
            .into_iter()
            .map(|(id, quantity, price)| {
                CartLine::new(
                    LineId::new(id),
                    ProductId::new(id),
                    format!("Book {}", id),
                    quantity,
                    BigDecimal::from(price),
                    None,
                )
                .unwrap()
            })
            .collect();
        store.replace(lines, Utc::now());
        SelectLinesUseCaseImpl {
            store,
            logger: mock_logger(),
        }
    }

    #[test]
    fn should_total_only_selected_lines() {
        let use_case = use_case();

        let summary = use_case
            .execute(SelectLinesParams {
                target: SelectionTarget::Line(LineId::new(2)),
                selected: true,
            })
            .unwrap();

        assert_eq!(summary.selected_subtotal, BigDecimal::from(25));
        assert_eq!(summary.subtotal, BigDecimal::from(45));
    }

    #[test]
    fn should_select_and_deselect_all() {
        let use_case = use_case();

        let all = use_case
            .execute(SelectLinesParams {
                target: SelectionTarget::All,
                selected: true,
            })
            .unwrap();
        let none = use_case
            .execute(SelectLinesParams {
                target: SelectionTarget::All,
                selected: false,
            })
            .unwrap();

        assert_eq!(all.selected_subtotal, BigDecimal::from(45));
        assert_eq!(none.selected_subtotal, BigDecimal::from(0));
    }

    #[test]
    fn should_reject_unknown_line() {
        let use_case = use_case();

        let result = use_case.execute(SelectLinesParams {
            target: SelectionTarget::Line(LineId::new(99)),
            selected: true,
        });

        assert!(matches!(result, Err(CartError::LineNotFound(_))));
    }
}
