use crate::combat::damage::Damage;
use crate::creature::genome::Gene;
use crate::creature::{Creature, CreatureId};
use crate::world::resources::FoodStorage;
use crate::world::tile::{MovementType, TerrainKind, Tile};
use crate::world::World;
use serde::{Deserialize, Serialize};

/// Read-only view of a tile for renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub x: usize,
    pub y: usize,
    pub terrain: TerrainKind,
    pub symbol: char,
    pub food: FoodStorage,
    pub plant_food_capacity: f64,
    pub creature_mass: u32,
    pub creature_mass_capacity: u32,
    pub movement_types: Vec<MovementType>,
    pub occupants: Vec<CreatureId>,
}

impl TileSnapshot {
    pub fn capture(world: &World, tile: &Tile) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            terrain: tile.terrain,
            symbol: tile.terrain.symbol(),
            food: tile.food,
            plant_food_capacity: tile.plant_food_capacity,
            creature_mass: tile.creature_mass(),
            creature_mass_capacity: tile.creature_mass_capacity,
            movement_types: tile.movement_types.clone(),
            occupants: world.creature_ids_at(tile.x, tile.y),
        }
    }

    /// Every tile in row-major order.
    pub fn capture_all(world: &World) -> Vec<Self> {
        world.tiles().map(|tile| Self::capture(world, tile)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub x: usize,
    pub y: usize,
    pub hp: f64,
    pub max_hp: f64,
    pub energy: f64,
    pub energy_consumption: f64,
    pub fat: f64,
    pub fat_capacity: f64,
    pub age: u32,
    pub lifespan: u32,
    pub mass: u32,
    pub speed: u32,
    pub attack: Damage,
    pub defence: Damage,
    pub retribution: Damage,
    pub generation: u32,
    pub alive: bool,
    pub genes: Vec<Gene>,
}

impl From<&Creature> for CreatureSnapshot {
    fn from(creature: &Creature) -> Self {
        let (x, y) = creature.position();
        Self {
            id: creature.id,
            x,
            y,
            hp: creature.hp,
            max_hp: creature.max_hp(),
            energy: creature.energy,
            energy_consumption: creature.energy_consumption(),
            fat: creature.fat,
            fat_capacity: creature.fat_capacity(),
            age: creature.age,
            lifespan: creature.lifespan(),
            mass: creature.mass(),
            speed: creature.speed(),
            attack: *creature.attack(),
            defence: *creature.defence(),
            retribution: *creature.retribution(),
            generation: creature.generation,
            alive: creature.alive,
            genes: creature.genes().iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreatureConfig;
    use crate::creature::genome::{GeneId, GeneSet};

    #[test]
    fn test_tile_snapshot_lists_occupants() {
        let mut world = World::from_terrain(vec![vec![TerrainKind::River; 2]; 2]).unwrap();
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Scavenger));
        genes.insert(Gene::new(GeneId::Fins));
        world
            .add_creature(Creature::new(4, genes, &CreatureConfig::default()), 1, 0)
            .unwrap();

        let snapshots = TileSnapshot::capture_all(&world);
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[1].occupants, vec![4]);
        assert_eq!(snapshots[1].creature_mass, 10);
        assert_eq!(snapshots[1].symbol, '=');
        assert!(snapshots[0].occupants.is_empty());
    }

    #[test]
    fn test_creature_snapshot() {
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Carnivore));
        genes.insert(Gene::with_power(GeneId::Claws, 2));
        let creature = Creature::new(9, genes, &CreatureConfig::default());

        let snapshot = CreatureSnapshot::from(&creature);
        assert_eq!(snapshot.id, 9);
        assert_eq!(snapshot.attack.physical, 50.0);
        assert_eq!(snapshot.max_hp, 25.0);
        assert_eq!(snapshot.genes.len(), 6);
        assert!(snapshot.alive);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"CLAWS\""));
    }
}
