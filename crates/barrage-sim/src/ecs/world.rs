use glam::Vec2;

use barrage_core::components::{
    Bounce, BulletFactory, InWorld, Label, Shape, Target, Visual,
};
use barrage_core::pattern::BulletSource;
use barrage_core::timing::{Cooldown, LerpThing};
use barrage_core::types::EntityId;

use super::entity::EntityAllocator;

/// SoA (Struct of Arrays) entity store.
/// Each component kind has its own `Vec<Option<T>>` table, indexed by entity index.
#[derive(Debug, Default)]
pub struct World {
    pub allocator: EntityAllocator,
    alive: Vec<bool>,

    // Component storage, one table per kind
    pub positions: Vec<Option<Vec2>>,
    pub momenta: Vec<Option<Vec2>>,
    pub in_world: Vec<Option<InWorld>>,
    pub lifetimes: Vec<Option<Cooldown>>,
    pub fades: Vec<Option<LerpThing>>,
    pub angular_momenta: Vec<Option<f32>>,
    pub bounces: Vec<Option<Bounce>>,
    pub bullet_sources: Vec<Option<BulletSource>>,
    pub bullet_factories: Vec<Option<BulletFactory>>,
    pub rotations: Vec<Option<LerpThing>>,
    pub targets: Vec<Option<Target>>,
    pub visuals: Vec<Option<Visual>>,
    pub labels: Vec<Option<Label>>,
    pub shapes: Vec<Option<Shape>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;

        // Grow all storage to accommodate
        while self.alive.len() <= idx {
            self.alive.push(false);
            self.positions.push(None);
            self.momenta.push(None);
            self.in_world.push(None);
            self.lifetimes.push(None);
            self.fades.push(None);
            self.angular_momenta.push(None);
            self.bounces.push(None);
            self.bullet_sources.push(None);
            self.bullet_factories.push(None);
            self.rotations.push(None);
            self.targets.push(None);
            self.visuals.push(None);
            self.labels.push(None);
            self.shapes.push(None);
        }

        self.alive[idx] = true;
        id
    }

    /// Remove an entity and all its components. Stale ids are a no-op.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        self.alive[idx] = false;
        self.positions[idx] = None;
        self.momenta[idx] = None;
        self.in_world[idx] = None;
        self.lifetimes[idx] = None;
        self.fades[idx] = None;
        self.angular_momenta[idx] = None;
        self.bounces[idx] = None;
        self.bullet_sources[idx] = None;
        self.bullet_factories[idx] = None;
        self.rotations[idx] = None;
        self.targets[idx] = None;
        self.visuals[idx] = None;
        self.labels[idx] = None;
        self.shapes[idx] = None;
        self.allocator.deallocate(id)
    }

    /// Remove whatever entity currently lives at `index`.
    pub fn despawn_at(&mut self, index: usize) -> bool {
        match self.entity_at(index) {
            Some(id) => self.despawn(id),
            None => false,
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id)
            && (id.index as usize) < self.alive.len()
            && self.alive[id.index as usize]
    }

    /// Table index of a live entity, `None` for stale ids.
    pub fn slot(&self, id: EntityId) -> Option<usize> {
        self.is_alive(id).then_some(id.index as usize)
    }

    /// Rebuild the id of the live entity at `index`.
    pub fn entity_at(&self, index: usize) -> Option<EntityId> {
        if !self.alive.get(index).copied().unwrap_or(false) {
            return None;
        }
        let generation = self.allocator.generation_of(index as u32)?;
        Some(EntityId::new(index as u32, generation))
    }

    pub fn entity_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Iterate over all alive entity indices
    pub fn alive_entities(&self) -> Vec<usize> {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| if alive { Some(i) } else { None })
            .collect()
    }

    /// Despawn everything. Generations are bumped, so ids handed out before
    /// the clear stay invalid afterwards.
    pub fn clear(&mut self) {
        for idx in self.alive_entities() {
            self.despawn_at(idx);
        }
    }
}

/// Indices holding a component, collected up front so a system can spawn
/// and despawn while it walks them.
pub fn occupied<T>(table: &[Option<T>]) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.as_ref().map(|_| i))
        .collect()
}
