use serde::{Deserialize, Serialize};

use crate::FlowError;

/// One fixed stress-inventory statement the participant rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// 0-based position in the inventory
    pub ordinal: usize,
    /// The canonical statement text, fixed at process start
    pub prompt: String,
}

/// The ordered, immutable list of inventory items for one study.
#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

/// The eleven CSSS statements, in study order.
const CSSS_STATEMENTS: [&str; 11] = [
    "Felt anxious or distressed about personal relationships",
    "Felt anxious or distressed about family matters",
    "Felt anxious or distressed about financial matters",
    "Felt anxious or distressed about academic matters",
    "Felt anxious or distressed about housing matters",
    "Felt anxious or distressed about being away from home",
    "Questioned your ability to handle difficulties in your life",
    "Questioned your ability to attain your personal goals",
    "Felt anxious or distressed because events were not going as planned",
    "Felt as though you were NO longer in control of your life",
    "Felt overwhelmed by difficulties in your life",
];

impl Inventory {
    /// Build an inventory from arbitrary statements.
    pub fn new(statements: Vec<String>) -> Result<Self, FlowError> {
        if statements.is_empty() {
            return Err(FlowError::EmptyInventory);
        }

        let items = statements
            .into_iter()
            .enumerate()
            .map(|(ordinal, prompt)| InventoryItem { ordinal, prompt })
            .collect();

        Ok(Self { items })
    }

    /// The canonical CSSS stress inventory.
    pub fn csss() -> Self {
        Self::new(CSSS_STATEMENTS.iter().map(|s| s.to_string()).collect())
            .expect("CSSS inventory is non-empty")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&InventoryItem> {
        self.items.get(ordinal)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csss_has_eleven_items_in_order() {
        let inventory = Inventory::csss();
        assert_eq!(inventory.len(), 11);
        assert_eq!(inventory.get(0).unwrap().ordinal, 0);
        assert!(inventory.get(10).unwrap().prompt.contains("overwhelmed"));
        assert!(inventory.get(11).is_none());
    }

    #[test]
    fn test_empty_inventory_is_rejected() {
        assert!(matches!(
            Inventory::new(vec![]),
            Err(FlowError::EmptyInventory)
        ));
    }
}
