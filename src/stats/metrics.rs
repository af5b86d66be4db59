use crate::creature::genome::GeneId;
use crate::creature::Creature;
use crate::world::resources::FoodStorage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub tick: u64,
    pub population: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub scavengers: usize,
    pub total_energy: f64,
    pub avg_energy: f64,
    pub avg_mass: f64,
    pub avg_generation: f64,
    pub max_generation: u32,
    pub avg_age: f64,
    pub total_food: FoodStorage,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl SimulationMetrics {
    pub fn compute<'a>(
        tick: u64,
        creatures: impl IntoIterator<Item = &'a Creature>,
        total_food: FoodStorage,
        total_births: u64,
        total_deaths: u64,
    ) -> Self {
        let creatures: Vec<&Creature> = creatures.into_iter().filter(|c| c.alive).collect();
        let population = creatures.len();
        let count = |id: GeneId| creatures.iter().filter(|c| c.has_gene(id)).count();
        let average = |total: f64| {
            if population == 0 {
                0.0
            } else {
                total / population as f64
            }
        };

        let total_energy: f64 = creatures.iter().map(|c| c.energy).sum();
        let total_mass: f64 = creatures.iter().map(|c| c.mass() as f64).sum();
        let total_generation: f64 = creatures.iter().map(|c| c.generation as f64).sum();
        let total_age: f64 = creatures.iter().map(|c| c.age as f64).sum();

        Self {
            tick,
            population,
            herbivores: count(GeneId::Herbivore),
            carnivores: count(GeneId::Carnivore),
            scavengers: count(GeneId::Scavenger),
            total_energy,
            avg_energy: average(total_energy),
            avg_mass: average(total_mass),
            avg_generation: average(total_generation),
            max_generation: creatures.iter().map(|c| c.generation).max().unwrap_or(0),
            avg_age: average(total_age),
            total_food,
            total_births,
            total_deaths,
        }
    }
}
