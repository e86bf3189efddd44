use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::domain::shared::value_objects::{LineId, ProductId};

use super::errors::CartError;

/// Quantity and line total, always displayed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub quantity: u32,
    pub total_price: BigDecimal,
}

/// One product entry within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Authoritative copy cached from the server at last sync.
    pub unit_price: BigDecimal,
    pub total_price: BigDecimal,
    /// Stock ceiling as of the last sync, when the backend reports it.
    pub stock: Option<u32>,
}

impl CartLine {
    pub fn new(
        id: LineId,
        product_id: ProductId,
        product_name: String,
        quantity: u32,
        unit_price: BigDecimal,
        stock: Option<u32>,
    ) -> Result<Self, CartError> {
        if quantity < 1 {
            return Err(CartError::QuantityBelowMinimum);
        }

        let total_price = &unit_price * &BigDecimal::from(quantity);
        Ok(Self {
            id,
            product_id,
            product_name,
            quantity,
            unit_price,
            total_price,
            stock,
        })
    }

    /// Constructor for data returned by the remote cart service (no validation).
    pub fn from_remote(
        id: LineId,
        product_id: ProductId,
        product_name: String,
        quantity: u32,
        unit_price: BigDecimal,
        total_price: BigDecimal,
        stock: Option<u32>,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name,
            quantity,
            unit_price,
            total_price,
            stock,
        }
    }

    pub fn amounts(&self) -> LineAmounts {
        LineAmounts {
            quantity: self.quantity,
            total_price: self.total_price.clone(),
        }
    }

    /// Amounts this line would show at `quantity`, priced locally.
    pub fn priced_at(&self, quantity: u32) -> LineAmounts {
        LineAmounts {
            quantity,
            total_price: &self.unit_price * &BigDecimal::from(quantity),
        }
    }

    pub fn apply(&mut self, amounts: &LineAmounts) {
        self.quantity = amounts.quantity;
        self.total_price = amounts.total_price.clone();
    }

    /// Overwrites every server-owned field with the authoritative copy.
    pub fn merge_authoritative(&mut self, server: &CartLine) {
        self.product_id = server.product_id;
        self.product_name = server.product_name.clone();
        self.quantity = server.quantity;
        self.unit_price = server.unit_price.clone();
        self.total_price = server.total_price.clone();
        self.stock = server.stock;
    }

    /// Local preconditions for changing this line to `quantity`.
    pub fn check_quantity(&self, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::QuantityBelowMinimum);
        }
        match self.stock {
            Some(0) => Err(CartError::OutOfStockConfirmationRequired(self.id)),
            Some(remaining) if quantity > remaining => Err(CartError::StockExceeded { remaining }),
            _ => Ok(()),
        }
    }
}

/// Derived totals for display next to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: BigDecimal,
    pub selected_subtotal: BigDecimal,
}

/// Last known good cart state, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    /// Lines ticked for checkout.
    pub selected: BTreeSet<LineId>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            lines,
            selected: BTreeSet::new(),
            fetched_at: Some(fetched_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn position(&self, line_id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == line_id)
    }

    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    pub fn line_mut(&mut self, line_id: LineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == line_id)
    }

    pub fn is_selected(&self, line_id: LineId) -> bool {
        self.selected.contains(&line_id)
    }

    pub fn summary(&self) -> CartSummary {
        let subtotal = self
            .lines
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + &line.total_price);
        let selected_subtotal = self
            .lines
            .iter()
            .filter(|line| self.selected.contains(&line.id))
            .fold(BigDecimal::zero(), |acc, line| acc + &line.total_price);

        CartSummary {
            line_count: self.lines.len(),
            item_count: self.lines.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal,
            selected_subtotal,
        }
    }
}

/// An in-flight quantity change. Lives for exactly one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub seq: u64,
    pub line_id: LineId,
    /// Rollback target: the newest amounts the server is known to hold.
    pub prior: LineAmounts,
    /// Sequence number of the call that produced `prior` (or of the last refresh).
    pub prior_seq: u64,
    pub optimistic: LineAmounts,
}
