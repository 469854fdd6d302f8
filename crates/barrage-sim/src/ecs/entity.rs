//! Entity id allocation with generation tags.

use barrage_core::types::EntityId;

/// Hands out entity ids, recycling freed indices under a new generation.
#[derive(Debug)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    next_index: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_indices: Vec::new(),
            next_index: 0,
        }
    }

    pub fn allocate(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            let generation = self.generations[index as usize];
            EntityId::new(index, generation)
        } else {
            let index = self.next_index;
            self.next_index += 1;
            self.generations.push(0);
            EntityId::new(index, 0)
        }
    }

    /// Free `id`. Stale ids are ignored.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = &mut self.generations[id.index as usize];
        *slot = slot.wrapping_add(1);
        self.free_indices.push(id.index);
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&g| g == id.generation)
    }

    /// Current generation of an index, used to rebuild ids from table slots.
    pub fn generation_of(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_deallocate() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert_eq!(e0, EntityId::new(0, 0));
        assert!(alloc.is_alive(e0));

        assert!(alloc.deallocate(e0));
        assert!(!alloc.is_alive(e0));

        let reused = alloc.allocate();
        assert_eq!(reused, EntityId::new(0, 1));
        assert!(alloc.is_alive(reused));
        assert!(!alloc.is_alive(e0));
    }

    #[test]
    fn stale_deallocate_is_ignored() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        let reused = alloc.allocate();
        assert!(!alloc.deallocate(e0));
        assert!(alloc.is_alive(reused));
    }

    #[test]
    fn generation_bumps_on_free() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        assert_eq!(alloc.generation_of(0), Some(1));
        assert_eq!(alloc.generation_of(5), None);
    }

    #[test]
    fn sequential_allocation() {
        let mut alloc = EntityAllocator::new();
        let ids: Vec<u32> = (0..3).map(|_| alloc.allocate().index).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
