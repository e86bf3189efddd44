use business::domain::cart::errors::CartError;
use business::domain::cart::outcome::MutationOutcome;
use business::domain::cart::use_cases::remove_line::RemoveLineParams;
use business::domain::cart::use_cases::select::{SelectLinesParams, SelectionTarget};
use business::domain::cart::use_cases::set_quantity::SetQuantityParams;
use business::domain::shared::value_objects::LineId;

use crate::cli::Command;
use crate::console::render::render;

use super::dependency_injection::DependencyContainer;

pub struct Runner;

impl Runner {
    /// Loads the cart, applies one command and prints the resulting cart.
    pub async fn run(command: Command, container: DependencyContainer) -> anyhow::Result<()> {
        tracing::debug!(?command, "running cart command");
        container
            .refresh
            .execute()
            .await
            .map_err(|e| anyhow::anyhow!(e.message()))?;

        match command {
            Command::Show { select } => {
                for line_id in select {
                    if let Err(error) = container.select.execute(SelectLinesParams {
                        target: SelectionTarget::Line(LineId::new(line_id)),
                        selected: true,
                    }) {
                        println!("error: {}", error.message());
                    }
                }
            }
            Command::Set { line_id, quantity } => {
                let line_id = LineId::new(line_id);
                let outcome = container
                    .set_quantity
                    .execute(SetQuantityParams { line_id, quantity })
                    .await;

                // Out-of-stock lines can only go away; offer that instead.
                if let MutationOutcome::Rejected(CartError::OutOfStockConfirmationRequired(_)) =
                    outcome
                {
                    println!("This book is out of stock.");
                    container
                        .remove_line
                        .execute(RemoveLineParams { line_id })
                        .await;
                }
            }
            Command::Remove { line_id } => {
                container
                    .remove_line
                    .execute(RemoveLineParams {
                        line_id: LineId::new(line_id),
                    })
                    .await;
            }
            Command::Clear => {
                container.clear_cart.execute().await;
            }
        }

        println!("{}", render(&container.store.snapshot()));
        Ok(())
    }
}
