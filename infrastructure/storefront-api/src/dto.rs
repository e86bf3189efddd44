use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use business::domain::cart::model::CartLine;
use business::domain::shared::value_objects::{LineId, ProductId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
    #[serde(default)]
    pub total_price: Option<BigDecimal>,
    #[serde(default)]
    pub stock: Option<u32>,
}

impl CartLineDto {
    pub fn into_domain(self) -> CartLine {
        let total_price = self
            .total_price
            .unwrap_or_else(|| &self.unit_price * &BigDecimal::from(self.quantity));
        CartLine::from_remote(
            LineId::new(self.id),
            ProductId::new(self.product_id),
            self.product_name,
            self.quantity,
            self.unit_price,
            total_price,
            self.stock,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CartDto {
    #[serde(default)]
    pub lines: Vec<CartLineDto>,
}

#[derive(Debug, Deserialize)]
pub struct LineEnvelopeDto {
    pub line: CartLineDto,
}

#[derive(Debug, Serialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn should_parse_cart_payload() {
        let json = r#"{
            "lines": [
                {"id": 1, "productId": 501, "productName": "Dune", "quantity": 2,
                 "unitPrice": "10.50", "totalPrice": "21.00", "stock": 7},
                {"id": 2, "productId": 502, "quantity": 1, "unitPrice": 8}
            ]
        }"#;

        let cart: CartDto = serde_json::from_str(json).unwrap();
        let lines: Vec<CartLine> = cart.lines.into_iter().map(CartLineDto::into_domain).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_name, "Dune");
        assert_eq!(lines[0].total_price, BigDecimal::from_str("21.00").unwrap());
        assert_eq!(lines[0].stock, Some(7));
        assert_eq!(lines[1].product_name, "");
        assert_eq!(lines[1].stock, None);
    }

    #[test]
    fn should_derive_missing_total_from_unit_price() {
        let json = r#"{"line": {"id": 3, "productId": 9, "quantity": 3, "unitPrice": "4.25"}}"#;

        let envelope: LineEnvelopeDto = serde_json::from_str(json).unwrap();
        let line = envelope.line.into_domain();

        assert_eq!(line.total_price, BigDecimal::from_str("12.75").unwrap());
    }

    #[test]
    fn should_treat_missing_lines_as_empty_cart() {
        let cart: CartDto = serde_json::from_str("{}").unwrap();

        assert!(cart.lines.is_empty());
    }

    #[test]
    fn should_serialize_update_request() {
        let body = serde_json::to_string(&UpdateQuantityRequest { quantity: 4 }).unwrap();

        assert_eq!(body, r#"{"quantity":4}"#);
    }
}
