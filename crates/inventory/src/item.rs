use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campuserp_core::{DomainError, DomainResult, Entity};

/// Stock item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(Uuid);

impl StockItemId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for StockItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for StockItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One stock item in the school inventory register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: StockItemId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    /// Unit price in the smallest currency unit, for valuation.
    pub unit_price: i64,
}

impl StockItem {
    pub fn value(&self) -> i64 {
        self.quantity * self.unit_price
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The inventory register: stock items with non-negative quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRegister {
    items: Vec<StockItem>,
}

impl StockRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: StockItemId) -> Option<&StockItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn create(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: i64,
    ) -> DomainResult<StockItemId> {
        if unit_price < 0 {
            return Err(DomainError::validation("unit price must be non-negative"));
        }
        let item = StockItem {
            id: StockItemId::new(),
            name: name.into(),
            category: category.into(),
            quantity: 0,
            unit_price,
        };
        let id = item.id;
        tracing::debug!(item = %item.name, "stock item created");
        self.items.push(item);
        Ok(id)
    }

    /// Adjust stock by a signed delta; stock never goes negative.
    pub fn adjust(&mut self, id: StockItemId, delta: i64) -> DomainResult<i64> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound)?;

        let new_quantity = item.quantity + delta;
        if new_quantity < 0 {
            return Err(DomainError::invariant(format!(
                "stock for '{}' cannot go negative",
                item.name
            )));
        }
        item.quantity = new_quantity;
        Ok(new_quantity)
    }

    /// Total valuation across all items.
    pub fn valuation(&self) -> i64 {
        self.items.iter().map(StockItem::value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn adjust_moves_quantity_and_valuation() {
        let mut reg = StockRegister::new();
        let desks = reg.create("Desk", "Furniture", 2_500).unwrap();
        let chairs = reg.create("Chair", "Furniture", 900).unwrap();

        reg.adjust(desks, 10).unwrap();
        reg.adjust(chairs, 40).unwrap();
        reg.adjust(chairs, -5).unwrap();

        assert_eq!(reg.get(desks).unwrap().quantity, 10);
        assert_eq!(reg.get(chairs).unwrap().quantity, 35);
        assert_eq!(reg.valuation(), 10 * 2_500 + 35 * 900);
    }

    #[test]
    fn stock_cannot_go_negative() {
        let mut reg = StockRegister::new();
        let id = reg.create("Projector", "Lab", 80_000).unwrap();
        reg.adjust(id, 2).unwrap();
        let err = reg.adjust(id, -3).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(reg.get(id).unwrap().quantity, 2);
    }

    #[test]
    fn unknown_item_is_not_found() {
        let mut reg = StockRegister::new();
        assert_eq!(
            reg.adjust(StockItemId::new(), 1),
            Err(DomainError::NotFound)
        );
    }

    proptest! {
        /// Applying any sequence of accepted adjustments keeps stock
        /// non-negative and valuation equal to quantity times price.
        #[test]
        fn accepted_adjustments_preserve_invariants(
            deltas in prop::collection::vec(-20i64..20, 1..50)
        ) {
            let mut reg = StockRegister::new();
            let id = reg.create("Marker", "Consumables", 50).unwrap();
            for delta in deltas {
                let _ = reg.adjust(id, delta);
                let item = reg.get(id).unwrap();
                prop_assert!(item.quantity >= 0);
                prop_assert_eq!(reg.valuation(), item.quantity * 50);
            }
        }
    }
}
