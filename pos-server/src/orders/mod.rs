//! Order lifecycle
//!
//! - **pricing**: server-side totals from authoritative menu prices
//! - **status**: the status state machine
//! - **service**: transactional create, update and delete
//!
//! # Data Flow
//!
//! ```text
//! OrderCreate → distinct ids → menu_item::find_by_ids ─┐
//!                                                      ↓
//!                             price_order → insert order + lines → commit
//! ```
//!
//! Everything after the lookup runs in the same SQLite transaction.

pub mod pricing;
pub mod service;
pub mod status;

pub use pricing::{PricedLine, PricedOrder, distinct_ids, price_order};
pub use service::{create_order, delete_order, get_order, list_orders, update_order};
pub use status::ensure_transition;
