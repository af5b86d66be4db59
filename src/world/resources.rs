use super::World;
use crate::config::FoodConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Plant,
    Meat,
    Carrion,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [FoodType::Plant, FoodType::Meat, FoodType::Carrion];

    pub fn index(self) -> usize {
        match self {
            FoodType::Plant => 0,
            FoodType::Meat => 1,
            FoodType::Carrion => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodStorage {
    pub plant: f64,
    pub meat: f64,
    pub carrion: f64,
}

impl FoodStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(FoodType, f64)]) -> Self {
        let mut food = Self::default();
        for &(kind, amount) in pairs {
            food.set(kind, amount);
        }
        food
    }

    pub fn types(&self) -> [FoodType; 3] {
        FoodType::ALL
    }

    pub fn get(&self, kind: FoodType) -> f64 {
        match kind {
            FoodType::Plant => self.plant,
            FoodType::Meat => self.meat,
            FoodType::Carrion => self.carrion,
        }
    }

    pub fn set(&mut self, kind: FoodType, amount: f64) {
        let slot = match kind {
            FoodType::Plant => &mut self.plant,
            FoodType::Meat => &mut self.meat,
            FoodType::Carrion => &mut self.carrion,
        };
        *slot = amount.max(0.0);
    }

    pub fn add(&mut self, kind: FoodType, amount: f64) {
        self.set(kind, self.get(kind) + amount);
    }

    pub fn absorb(&mut self, other: &FoodStorage) {
        for kind in FoodType::ALL {
            self.add(kind, other.get(kind));
        }
    }

    pub fn total(&self) -> f64 {
        self.plant + self.meat + self.carrion
    }
}

impl World {
    pub fn refresh_tiles(&mut self, config: &FoodConfig) {
        for tile in self.tiles_mut() {
            tile.refresh(config);
        }
    }

    pub fn total_food(&self) -> FoodStorage {
        let mut total = FoodStorage::new();
        for tile in self.tiles() {
            total.absorb(&tile.food);
        }
        total
    }
}
