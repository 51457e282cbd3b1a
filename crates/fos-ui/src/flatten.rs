//! Child flattener
//!
//! Collapses nested, sparse sequences into one flat, ordered sequence.
//! Holes (`undefined`, `null`, `false`) are dropped; everything else keeps
//! its relative order.

/// A value that may be a hole or a nested sequence of values
pub trait Collect: Sized {
    /// True for the values flattening drops
    fn is_hole(&self) -> bool;

    /// Nested items, or the value itself when it is a leaf
    fn into_items(self) -> Result<Vec<Self>, Self>;
}

/// Flatten `value` depth-first into a list of leaves
pub fn flatten<T: Collect>(value: T) -> Vec<T> {
    let mut out = Vec::new();
    flatten_into(value, &mut out);
    out
}

fn flatten_into<T: Collect>(value: T, out: &mut Vec<T>) {
    match value.into_items() {
        Ok(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Err(leaf) => {
            if !leaf.is_hole() {
                out.push(leaf);
            }
        }
    }
}
