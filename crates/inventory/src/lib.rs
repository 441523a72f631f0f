//! School inventory domain module.
//!
//! This crate contains business rules for stock items (furniture, lab
//! equipment, consumables), implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod item;

pub use item::{StockItem, StockItemId, StockRegister};
