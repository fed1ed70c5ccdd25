//! Ordered artifact selection, unique by name. Every operation returns a new
//! list and leaves its input untouched.

use crate::catalog::ItemDescriptor;

/// Appends `item`, dropping any earlier entry with the same name first.
pub fn add(selection: &[ItemDescriptor], item: ItemDescriptor) -> Vec<ItemDescriptor> {
    let mut result: Vec<ItemDescriptor> = selection
        .iter()
        .filter(|existing| existing.name != item.name)
        .cloned()
        .collect();
    result.push(item);
    result
}

pub fn remove(selection: &[ItemDescriptor], name: &str) -> Vec<ItemDescriptor> {
    selection
        .iter()
        .filter(|existing| existing.name != name)
        .cloned()
        .collect()
}

pub fn select_many(
    selection: &[ItemDescriptor],
    items: &[ItemDescriptor],
    selected: bool,
) -> Vec<ItemDescriptor> {
    items.iter().fold(selection.to_vec(), |current, item| {
        if selected {
            add(&current, item.clone())
        } else {
            remove(&current, &item.name)
        }
    })
}

pub fn contains(selection: &[ItemDescriptor], name: &str) -> bool {
    selection.iter().any(|item| item.name == name)
}

pub fn names(selection: &[ItemDescriptor]) -> Vec<String> {
    selection.iter().map(|item| item.name.clone()).collect()
}
