use crate::creature::genome::GeneId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub food: FoodConfig,
    pub creature: CreatureConfig,
    pub population: PopulationConfig,
    pub evolution: EvolutionConfig,
    pub combat: CombatConfig,
    pub simulation: SimulationConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    /// JSON map in the `{"tiles": [...]}` format. Random terrain when unset.
    pub map_path: Option<String>,
    pub grassland_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodConfig {
    pub plant_regrowth_rate: f64,
    pub carrion_retention: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureConfig {
    pub base_regeneration: f64,
    pub specialization_bonus: f64,
    pub extra_movement_type_cost: f64,
    pub exploration_bonus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub base_creature_count: usize,
    pub bonus_spawn_chance: f64,
    pub bonus_spawn_count: usize,
    pub feeding_gene: Option<GeneId>,
    pub movement_gene: Option<GeneId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub mutation_chance: f64,
    pub gain_gene_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Mass ratio from which the bigger combatant gets `size_advantage`.
    pub size_ratio_threshold: f64,
    /// 1.0 disables size effects.
    pub size_advantage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub ticks_per_second: u64,
    pub log_interval_ticks: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub enabled: bool,
    pub address: String,
    pub port: u16,
    pub update_rate_hz: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            map_path: None,
            grassland_chance: 0.08,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            plant_regrowth_rate: 1.0,
            carrion_retention: 0.8,
        }
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            base_regeneration: 5.0,
            specialization_bonus: 0.05,
            extra_movement_type_cost: 5.0,
            exploration_bonus: 1.0,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            base_creature_count: 10,
            bonus_spawn_chance: 0.1,
            bonus_spawn_count: 10,
            feeding_gene: None,
            movement_gene: None,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_chance: 0.25,
            gain_gene_chance: 0.1,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            size_ratio_threshold: 2.0,
            size_advantage: 1.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 2,
            log_interval_ticks: 20,
            seed: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: "0.0.0.0".to_string(),
            port: 8080,
            update_rate_hz: 2,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.world.width, 10);
        assert_eq!(config.population.base_creature_count, 10);
        assert_eq!(config.food.carrion_retention, 0.8);
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.population.feeding_gene = Some(GeneId::Herbivore);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"HERBIVORE\""));

        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.world.width, deserialized.world.width);
        assert_eq!(deserialized.population.feeding_gene, Some(GeneId::Herbivore));
    }
}
