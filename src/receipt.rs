//! Plain-text receipts.

use std::fmt;

use crate::clients::CompletedSale;
use crate::pricing::format_money;

const RULE_WIDTH: usize = 32;

/// Renders the receipt of a completed sale.
pub fn render_receipt(store_name: &str, sale: &CompletedSale) -> String {
    Receipt { store_name, sale }.to_string()
}

/// Receipt layout. Amounts come from [`CompletedSale::totals`], which holds
/// the backend's figures whenever it reported them.
struct Receipt<'a> {
    store_name: &'a str,
    sale: &'a CompletedSale,
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sale = self.sale;
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", self.store_name)?;
        writeln!(f, "Receipt #{}", sale.receipt.transaction_id)?;
        writeln!(f, "Date: {}", sale.completed_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "{rule}")?;
        for line in &sale.lines {
            writeln!(f, "{} x {} = {}", line.name, line.quantity, format_money(line.line_total()))?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "Subtotal: {}", format_money(sale.totals.subtotal))?;
        writeln!(f, "Tax: {}", format_money(sale.totals.tax))?;
        if !sale.totals.discount.is_zero() {
            writeln!(f, "Discount: {}", format_money(sale.totals.discount))?;
        }
        writeln!(f, "Total: {}", format_money(sale.totals.total))?;
        writeln!(f, "{rule}")?;
        write!(f, "Thank you for shopping with us!")
    }
}
