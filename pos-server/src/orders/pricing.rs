//! Order pricing
//!
//! Totals are always computed from the stored menu prices with `Decimal`
//! arithmetic. Client-supplied prices are never read.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{MenuItem, OrderLineInput};

/// One request line with its snapshot price
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

impl PricedLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

/// Distinct menu item ids in first-occurrence order
pub fn distinct_ids(lines: &[OrderLineInput]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(lines.len());
    for line in lines {
        if !ids.contains(&line.menu_item_id) {
            ids.push(line.menu_item_id);
        }
    }
    ids
}

/// Price every line against `menu`
///
/// Returns the ids not present in `menu` (distinct, first-occurrence order)
/// when any line cannot be priced.
pub fn price_order(
    lines: &[OrderLineInput],
    menu: &HashMap<i64, MenuItem>,
) -> Result<PricedOrder, Vec<i64>> {
    let missing: Vec<i64> = distinct_ids(lines)
        .into_iter()
        .filter(|id| !menu.contains_key(id))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    let mut total = Decimal::ZERO;
    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(item) = menu.get(&line.menu_item_id) else {
            continue;
        };
        let priced_line = PricedLine {
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
            unit_price: item.price,
            notes: line.notes.clone(),
        };
        total += priced_line.line_total();
        priced.push(priced_line);
    }

    Ok(PricedOrder {
        lines: priced,
        total,
    })
}
