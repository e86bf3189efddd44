use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::shared::value_objects::LineId;

pub enum SelectionTarget {
    Line(LineId),
    All,
}

pub struct SelectLinesParams {
    pub target: SelectionTarget,
    pub selected: bool,
}

/// Selection is local state only; no remote call is involved.
pub trait SelectLinesUseCase: Send + Sync {
    fn execute(&self, params: SelectLinesParams) -> Result<CartSummary, CartError>;
}
