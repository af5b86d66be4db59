use super::resources::{FoodStorage, FoodType};
use crate::config::FoodConfig;
use crate::error::SimError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Walk,
    Fly,
    Swim,
    Climb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Forest,
    Grassland,
    Savannah,
    Desert,
    River,
    Sea,
    HighMountains,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 7] = [
        TerrainKind::Forest,
        TerrainKind::Grassland,
        TerrainKind::Savannah,
        TerrainKind::Desert,
        TerrainKind::River,
        TerrainKind::Sea,
        TerrainKind::HighMountains,
    ];

    pub fn symbol(self) -> char {
        match self {
            TerrainKind::Forest => 'F',
            TerrainKind::Grassland => '/',
            TerrainKind::Savannah => ':',
            TerrainKind::Desert => '.',
            TerrainKind::River => '=',
            TerrainKind::Sea => '~',
            TerrainKind::HighMountains => 'M',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, SimError> {
        TerrainKind::ALL
            .into_iter()
            .find(|kind| kind.symbol() == symbol)
            .ok_or(SimError::UnknownTile(symbol))
    }

    pub fn plant_food_capacity(self) -> f64 {
        match self {
            TerrainKind::Forest => 150.0,
            TerrainKind::Grassland => 200.0,
            TerrainKind::Savannah => 100.0,
            TerrainKind::Desert => 25.0,
            TerrainKind::River => 50.0,
            TerrainKind::Sea => 100.0,
            TerrainKind::HighMountains => 10.0,
        }
    }

    pub fn creature_mass_capacity(self) -> u32 {
        match self {
            TerrainKind::Forest => 150,
            TerrainKind::Grassland | TerrainKind::Savannah | TerrainKind::Desert => 200,
            TerrainKind::River => 300,
            TerrainKind::Sea => 500,
            TerrainKind::HighMountains => 100,
        }
    }

    pub fn movement_types(self) -> &'static [MovementType] {
        use MovementType::*;
        match self {
            TerrainKind::Forest => &[Walk, Climb, Fly],
            TerrainKind::Grassland | TerrainKind::Savannah | TerrainKind::Desert => &[Walk, Fly],
            TerrainKind::River => &[Walk, Swim, Fly],
            TerrainKind::Sea => &[Swim, Fly],
            TerrainKind::HighMountains => &[Climb, Fly],
        }
    }
}

/// One grid cell. Occupants are tracked by the world; the tile only keeps
/// their summed mass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub terrain: TerrainKind,
    pub plant_food_capacity: f64,
    pub creature_mass_capacity: u32,
    pub movement_types: Vec<MovementType>,
    pub food: FoodStorage,
    pub(crate) creature_mass: u32,
}

impl Tile {
    pub fn new(terrain: TerrainKind, x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            terrain,
            plant_food_capacity: terrain.plant_food_capacity(),
            creature_mass_capacity: terrain.creature_mass_capacity(),
            movement_types: terrain.movement_types().to_vec(),
            food: FoodStorage::new(),
            creature_mass: 0,
        }
    }

    pub fn creature_mass(&self) -> u32 {
        self.creature_mass
    }

    pub fn free_mass(&self) -> u32 {
        self.creature_mass_capacity.saturating_sub(self.creature_mass)
    }

    pub fn can_hold(&self, mass: u32) -> bool {
        self.creature_mass + mass <= self.creature_mass_capacity
    }

    pub fn supports(&self, movement: MovementType) -> bool {
        self.movement_types.contains(&movement)
    }

    pub fn refresh(&mut self, config: &FoodConfig) {
        let regrowth = self.plant_food_capacity * config.plant_regrowth_rate;
        let plant = (self.food.plant + regrowth).min(self.plant_food_capacity);
        self.food.set(FoodType::Plant, plant);

        let carrion = (self.food.carrion * config.carrion_retention).floor() + self.food.meat;
        self.food.set(FoodType::Carrion, carrion);
        self.food.set(FoodType::Meat, 0.0);
    }
}
