//! Registered (control, key) pairs.

use crate::control::ControlRef;

/// A control registered in a group under a unique key.
///
/// Cloning an item clones the handle, not the control: flag changes made
/// through a cloned item are visible to the group.
#[derive(Clone)]
pub struct Item<K> {
    pub control: ControlRef,
    pub key: K,
}

impl<K> Item<K> {
    pub fn new(control: ControlRef, key: K) -> Self {
        Self { control, key }
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for Item<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("selected", &self.control.is_selected())
            .finish()
    }
}
