//! Generational arena
//!
//! Slots are recycled through a free list; every removal bumps the slot's
//! generation so handles to a removed value never resolve again.

/// Generational index for safe references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenIndex {
    pub index: u32,
    pub generation: u32,
}

/// Generational arena (slot map)
pub struct GenArena<T> {
    items: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> GenArena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Insert item
    pub fn insert(&mut self, value: T) -> GenIndex {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            self.items[index as usize] = Some(value);
            GenIndex {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.items.len() as u32;
            self.items.push(Some(value));
            self.generations.push(0);
            GenIndex { index, generation: 0 }
        }
    }

    fn is_current(&self, idx: GenIndex) -> bool {
        self.generations.get(idx.index as usize) == Some(&idx.generation)
    }

    /// Get item
    pub fn get(&self, idx: GenIndex) -> Option<&T> {
        if !self.is_current(idx) {
            return None;
        }
        self.items.get(idx.index as usize)?.as_ref()
    }

    /// Get mutable item
    pub fn get_mut(&mut self, idx: GenIndex) -> Option<&mut T> {
        if !self.is_current(idx) {
            return None;
        }
        self.items.get_mut(idx.index as usize)?.as_mut()
    }

    pub fn contains(&self, idx: GenIndex) -> bool {
        self.get(idx).is_some()
    }

    /// Remove item
    pub fn remove(&mut self, idx: GenIndex) -> Option<T> {
        if !self.is_current(idx) {
            return None;
        }
        let value = self.items.get_mut(idx.index as usize)?.take()?;
        self.generations[idx.index as usize] += 1;
        self.free_list.push(idx.index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for GenArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
