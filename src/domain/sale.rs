use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{LineItem, ProductId};
use crate::pricing::{Rates, Totals};

/// Identifier of the cashier ringing up the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashierId(pub i64);

impl fmt::Display for CashierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the sale payload. Prices are not sent: the backend prices
/// the sale from its own catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for submitting a sale.
///
/// Built fresh from the cart for every submission and owned by the request,
/// so later cart edits cannot reach a sale that is already in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSubmission {
    pub cashier_id: CashierId,
    pub items: Vec<SaleLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_rate: Decimal,
}

impl SaleSubmission {
    pub fn from_cart(items: &[LineItem], cashier_id: CashierId, rates: &Rates) -> Self {
        Self {
            cashier_id,
            items: items
                .iter()
                .map(|item| SaleLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            tax_rate: rates.tax_rate(),
            discount_rate: rates.discount_rate(),
        }
    }
}

/// Transaction identifier assigned by the backend.
///
/// The sale endpoints disagree on the JSON type, so both numbers and strings
/// are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => TransactionId(n.to_string()),
            Raw::Text(s) => TransactionId(s),
        })
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the backend reports for an accepted sale.
///
/// Only the transaction id is guaranteed. The `/sales/` route answers with
/// `{"message", "receipt"}` and no amounts, so every total is optional; see
/// [`SaleReceipt::totals_or`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReceipt {
    #[serde(alias = "receipt")]
    pub transaction_id: TransactionId,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub tax: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SaleReceipt {
    /// Server amounts where reported, `local` for the rest.
    pub fn totals_or(&self, local: &Totals) -> Totals {
        Totals {
            subtotal: self.subtotal.unwrap_or(local.subtotal),
            tax: self.tax.unwrap_or(local.tax),
            discount: self.discount.unwrap_or(local.discount),
            total: self.total.unwrap_or(local.total),
        }
    }

    /// True when the backend reported every amount it is expected to.
    pub fn has_server_totals(&self) -> bool {
        self.subtotal.is_some() && self.tax.is_some() && self.total.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use rust_decimal_macros::dec;

    #[test]
    fn test_submission_wire_shape() {
        let items = vec![
            LineItem::from_product(&Product::new(1, "Rice", dec!(10.00), 9), 2),
            LineItem::from_product(&Product::new(4, "Beans", dec!(5.00), 9), 1),
        ];
        let rates = Rates::new(dec!(0.15), dec!(0)).unwrap();
        let submission = SaleSubmission::from_cart(&items, CashierId(42), &rates);

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "cashier_id": 42,
                "items": [
                    {"product_id": 1, "quantity": 2},
                    {"product_id": 4, "quantity": 1}
                ],
                "tax_rate": 0.15,
                "discount_rate": 0.0
            })
        );
    }

    #[test]
    fn test_receipt_accepts_numeric_transaction_id() {
        let json = r#"{"transaction_id": 981, "subtotal": 25.0, "tax": 3.75, "total": 28.75}"#;
        let receipt: SaleReceipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.transaction_id, TransactionId("981".to_string()));
        assert_eq!(receipt.total, Some(dec!(28.75)));
        assert_eq!(receipt.discount, None);
        assert!(receipt.has_server_totals());
    }

    #[test]
    fn test_receipt_decodes_sales_route_body_without_amounts() {
        let json = r#"{"message": "Sale complete", "receipt": "receipts/receipt_12.pdf"}"#;
        let receipt: SaleReceipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.transaction_id.to_string(), "receipts/receipt_12.pdf");
        assert_eq!(receipt.message.as_deref(), Some("Sale complete"));
        assert_eq!(receipt.subtotal, None);
        assert_eq!(receipt.total, None);
        assert!(!receipt.has_server_totals());
    }

    #[test]
    fn test_totals_or_prefers_server_amounts() {
        let local = Totals {
            subtotal: dec!(25.00),
            tax: dec!(3.75),
            discount: dec!(0),
            total: dec!(28.75),
        };
        let receipt: SaleReceipt =
            serde_json::from_str(r#"{"receipt": "R-0031", "subtotal": "4.00", "tax": "0.60"}"#).unwrap();

        let totals = receipt.totals_or(&local);

        assert_eq!(totals.subtotal, dec!(4.00));
        assert_eq!(totals.tax, dec!(0.60));
        assert_eq!(totals.discount, dec!(0));
        assert_eq!(totals.total, dec!(28.75));
    }
}
