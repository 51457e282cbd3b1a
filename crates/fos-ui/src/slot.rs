//! Named slots
//!
//! A slot tags one child with a name so the consuming component can pull
//! it out of its children and place it itself. Extraction drains the
//! slot: a second pass over the same children finds nothing.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Child, ElementType, Props};

/// A named single-value container
#[derive(Debug, Clone)]
pub struct Slot {
    name: String,
    value: Option<Box<Child>>,
}

impl Slot {
    pub fn new(name: impl Into<String>, value: impl Into<Child>) -> Self {
        Self {
            name: name.into(),
            value: Some(Box::new(value.into())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the value has been extracted
    pub fn is_drained(&self) -> bool {
        self.value.is_none()
    }

    /// Take the value, leaving the slot empty
    pub fn take(&mut self) -> Option<Child> {
        self.value.take().map(|v| *v)
    }
}

/// Wrap `children` in a slot named `name`
pub fn slot(name: impl Into<String>, children: impl Into<Child>) -> Child {
    Child::Slot(Slot::new(name, children))
}

impl ElementType {
    /// Function component form of [`slot`]: reads the `name` prop and wraps
    /// the children
    pub fn slot() -> Self {
        ElementType::Function(Rc::new(|mut props: Props| {
            let name = props.get_str("name").unwrap_or_default().to_string();
            slot(name, props.take_children())
        }))
    }
}

/// Values extracted from slots, keyed by slot name
#[derive(Debug, Default)]
pub struct Slots {
    values: HashMap<String, Child>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Child> {
        self.values.get(name)
    }

    /// Remove and return the value of `name`; [`Child::Empty`] when absent
    pub fn take(&mut self, name: &str) -> Child {
        self.values.remove(name).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: &str, value: Child) {
        self.values.insert(name.to_string(), value);
    }
}

/// Extract every slot found in `input`.
///
/// Slots inside sequences are replaced by holes; a top-level slot is
/// drained in place.
pub fn extract(input: &mut Child) -> Slots {
    let mut slots = Slots::new();
    extract_into(input, &mut slots);
    slots
}

/// Like [`extract`], accumulating into existing `slots`
pub fn extract_into(input: &mut Child, slots: &mut Slots) {
    match input {
        Child::Slot(slot) => {
            if let Some(value) = slot.take() {
                slots.insert(slot.name(), value);
            }
        }
        Child::List(items) => {
            for item in items.iter_mut() {
                if let Child::Slot(slot) = item {
                    if let Some(value) = slot.take() {
                        slots.insert(slot.name(), value);
                    }
                    *item = Child::Empty;
                } else {
                    extract_into(item, slots);
                }
            }
        }
        _ => {}
    }
}
