//! Inventory item records.

/// An item the player carries. Unique by `id` within an inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub name_vi: String,
    pub description: String,
    pub icon: String,
}

impl ItemRecord {
    /// Creates a record with only an id; display fields stay empty.
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            name_vi: String::new(),
            description: String::new(),
            icon: String::new(),
        }
    }
}

/// Ordered, id-deduplicated collection of carried items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    items: Vec<ItemRecord>,
    selected: Option<String>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Items in acquisition order.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Currently highlighted item id.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Appends `item` unless an item with the same id is already held.
    ///
    /// Returns `true` when the inventory changed.
    pub fn add(&mut self, item: ItemRecord) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the item with `id`, clearing the selection if it pointed there.
    pub fn remove(&mut self, id: &str) -> Option<ItemRecord> {
        let position = self.items.iter().position(|item| item.id == id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.items.remove(position))
    }

    /// Selects a held item or clears the selection. Unknown ids are ignored.
    ///
    /// Returns `true` when the selection changed.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        let next = match id {
            Some(id) if self.contains(id) => Some(id.to_owned()),
            Some(_) => return false,
            None => None,
        };
        if self.selected == next {
            return false;
        }
        self.selected = next;
        true
    }
}
