pub mod map;
pub mod resources;
pub mod tile;

use crate::creature::{Creature, CreatureId};
use crate::error::{SimError, SimResult};
use rand::Rng;
use resources::FoodType;
use std::collections::BTreeMap;
use tile::{TerrainKind, Tile};

#[derive(Debug, Clone)]
pub struct World {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    creatures: BTreeMap<CreatureId, Creature>,
}

impl World {
    pub fn from_terrain(grid: Vec<Vec<TerrainKind>>) -> SimResult<Self> {
        let height = grid.len();
        let width = grid.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(SimError::InvalidMap("empty terrain grid".to_string()));
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in grid.into_iter().enumerate() {
            if row.len() != width {
                return Err(SimError::InvalidMap(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            tiles.extend(
                row.into_iter()
                    .enumerate()
                    .map(|(x, terrain)| Tile::new(terrain, x, y)),
            );
        }

        Ok(Self {
            width,
            height,
            tiles,
            creatures: BTreeMap::new(),
        })
    }

    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        grassland_chance: f64,
        rng: &mut R,
    ) -> SimResult<Self> {
        let grid = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| {
                        if rng.gen::<f64>() < grassland_chance {
                            TerrainKind::Grassland
                        } else {
                            TerrainKind::Desert
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_terrain(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> SimResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(SimError::OutOfBounds { x, y });
        }
        Ok(y * self.width + x)
    }

    pub fn tile(&self, x: usize, y: usize) -> SimResult<&Tile> {
        let idx = self.index(x, y)?;
        Ok(&self.tiles[idx])
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> SimResult<&mut Tile> {
        let idx = self.index(x, y)?;
        Ok(&mut self.tiles[idx])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    pub fn adjacent_positions(&self, x: usize, y: usize) -> SimResult<[(usize, usize); 4]> {
        self.index(x, y)?;
        let left = if x > 0 { x - 1 } else { self.width - 1 };
        let right = if x + 1 < self.width { x + 1 } else { 0 };
        let up = if y > 0 { y - 1 } else { self.height - 1 };
        let down = if y + 1 < self.height { y + 1 } else { 0 };
        Ok([(left, y), (right, y), (x, up), (x, down)])
    }

    pub fn adjacent_tiles(&self, x: usize, y: usize) -> SimResult<Vec<&Tile>> {
        self.adjacent_positions(x, y)?
            .into_iter()
            .map(|(nx, ny)| self.tile(nx, ny))
            .collect()
    }

    pub fn creature(&self, id: CreatureId) -> SimResult<&Creature> {
        self.creatures.get(&id).ok_or(SimError::UnknownCreature(id))
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> SimResult<&mut Creature> {
        self.creatures
            .get_mut(&id)
            .ok_or(SimError::UnknownCreature(id))
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn creatures_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.values_mut()
    }

    pub fn creature_ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    pub fn population(&self) -> usize {
        self.creatures.values().filter(|c| c.alive).count()
    }

    pub fn creatures_at(&self, x: usize, y: usize) -> Vec<&Creature> {
        self.creatures
            .values()
            .filter(|c| c.alive && c.x == x && c.y == y)
            .collect()
    }

    pub fn creature_ids_at(&self, x: usize, y: usize) -> Vec<CreatureId> {
        self.creatures_at(x, y).into_iter().map(|c| c.id).collect()
    }

    /// Places `creature` on `(x, y)`. Returns `Ok(false)` without changing
    /// anything when the tile cannot hold its mass or the id is taken.
    pub fn add_creature(&mut self, mut creature: Creature, x: usize, y: usize) -> SimResult<bool> {
        let mass = creature.mass();
        let taken = self.creatures.contains_key(&creature.id);
        let tile = self.tile_mut(x, y)?;
        if taken || !tile.can_hold(mass) {
            return Ok(false);
        }
        tile.creature_mass += mass;

        creature.x = x;
        creature.y = y;
        self.creatures.insert(creature.id, creature);
        Ok(true)
    }

    /// Moves a creature from its current tile to `(to_x, to_y)`. All or
    /// nothing: `Ok(false)` leaves both tiles and the creature untouched.
    pub fn move_creature(&mut self, id: CreatureId, to_x: usize, to_y: usize) -> SimResult<bool> {
        let to = self.index(to_x, to_y)?;
        let creature = self.creature(id)?;
        let (mass, from_x, from_y) = (creature.mass(), creature.x, creature.y);
        let from = self.index(from_x, from_y)?;

        if from == to {
            return Ok(true);
        }
        if !self.tiles[to].can_hold(mass) {
            return Ok(false);
        }

        self.tiles[from].creature_mass -= mass;
        self.tiles[to].creature_mass += mass;
        let creature = self.creature_mut(id)?;
        creature.x = to_x;
        creature.y = to_y;
        Ok(true)
    }

    pub fn kill_creature(&mut self, id: CreatureId) -> SimResult<()> {
        let creature = self.creature_mut(id)?;
        if !creature.alive {
            return Ok(());
        }
        creature.alive = false;
        let (mass, meat, x, y) = (creature.mass(), creature.death_meat(), creature.x, creature.y);

        let tile = self.tile_mut(x, y)?;
        tile.creature_mass -= mass;
        tile.food.add(FoodType::Carrion, meat);
        Ok(())
    }

    pub fn remove_creature(&mut self, id: CreatureId) -> SimResult<Creature> {
        let mut creature = self
            .creatures
            .remove(&id)
            .ok_or(SimError::UnknownCreature(id))?;
        if creature.alive {
            let tile = self.tile_mut(creature.x, creature.y)?;
            tile.creature_mass -= creature.mass();
            creature.alive = false;
        }
        Ok(creature)
    }

    pub fn remove_dead(&mut self) -> usize {
        let before = self.creatures.len();
        self.creatures.retain(|_, c| c.alive);
        before - self.creatures.len()
    }

    pub fn mass_accounting_holds(&self) -> bool {
        let mut expected = vec![0u32; self.tiles.len()];
        for creature in self.creatures.values().filter(|c| c.alive) {
            match self.index(creature.x, creature.y) {
                Ok(idx) => expected[idx] += creature.mass(),
                Err(_) => return false,
            }
        }
        self.tiles
            .iter()
            .zip(expected)
            .all(|(tile, mass)| tile.creature_mass() == mass && mass <= tile.creature_mass_capacity)
    }
}
