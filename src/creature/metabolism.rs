use super::genome::{feeding_genes, GeneId, GeneSet};
use super::Creature;
use crate::combat::damage::Damage;
use crate::config::CreatureConfig;
use crate::world::resources::{FoodStorage, FoodType};
use serde::Serialize;

/// Stats derived once from the gene set. Fields are private so a creature's
/// stats cannot drift after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    food_efficiency: [f64; 3],
    bio_mass: u32,
    mass: u32,
    max_hp: f64,
    speed: u32,
    regeneration: f64,
    energy_consumption: f64,
    fat_capacity: f64,
    lifespan: u32,
    divide_chance: f64,
    attack: Damage,
    defence: Damage,
    retribution: Damage,
}

impl BasicStats {
    pub fn derive(genes: &GeneSet, config: &CreatureConfig) -> Self {
        let power = |id: GeneId| genes.power(id) as u32;

        let bio_mass = power(GeneId::Mass) * 10 + power(GeneId::Fat) * 5;
        let mass = bio_mass
            + genes
                .iter()
                .map(|gene| gene.power as u32 * gene.def().mass_cost)
                .sum::<u32>();

        let speed = (power(GeneId::Speed) as f64 * 10.0 - mass as f64 / 2.0)
            .max(1.0)
            .floor() as u32;

        let movement_kinds = genes.movement_types().len();
        let movement_surcharge =
            config.extra_movement_type_cost * movement_kinds.saturating_sub(1) as f64;
        let energy_consumption = bio_mass as f64
            + genes
                .iter()
                .map(|gene| gene.power as f64 * gene.def().energy_cost as f64)
                .sum::<f64>()
            + movement_surcharge;

        let fat_capacity = if genes.contains(GeneId::Fat) {
            power(GeneId::Fat) as f64 * 25.0
        } else {
            0.0
        };

        Self {
            food_efficiency: food_efficiency(genes, config),
            bio_mass,
            mass,
            max_hp: power(GeneId::Mass) as f64 * 25.0,
            speed,
            regeneration: config.base_regeneration + power(GeneId::Regeneration) as f64 * 10.0,
            energy_consumption,
            fat_capacity,
            lifespan: power(GeneId::Longevity) * 10,
            divide_chance: power(GeneId::Fertility) as f64 / 10.0,
            attack: genes.attack(),
            defence: genes.defence(),
            retribution: genes.retribution(),
        }
    }

    pub fn food_efficiency(&self, food: FoodType) -> f64 {
        self.food_efficiency[food.index()]
    }

    pub fn bio_mass(&self) -> u32 {
        self.bio_mass
    }

    pub fn mass(&self) -> u32 {
        self.mass
    }

    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn regeneration(&self) -> f64 {
        self.regeneration
    }

    pub fn energy_consumption(&self) -> f64 {
        self.energy_consumption
    }

    pub fn fat_capacity(&self) -> f64 {
        self.fat_capacity
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    pub fn divide_chance(&self) -> f64 {
        self.divide_chance
    }

    pub fn attack(&self) -> &Damage {
        &self.attack
    }

    pub fn defence(&self) -> &Damage {
        &self.defence
    }

    pub fn retribution(&self) -> &Damage {
        &self.retribution
    }
}

fn food_efficiency(genes: &GeneSet, config: &CreatureConfig) -> [f64; 3] {
    let mut efficiency = [0.0; 3];
    let total: u32 = feeding_genes().map(|id| genes.power(id) as u32).sum();
    if total == 0 {
        return efficiency;
    }

    let carried: Vec<GeneId> = feeding_genes().filter(|&id| genes.contains(id)).collect();
    let bonus = match carried.as_slice() {
        [only] => 1.0 + (config.specialization_bonus * (genes.power(*only) as f64 - 1.0)).max(0.0),
        _ => 1.0,
    };

    for id in feeding_genes() {
        if let Some(food) = id.def().food_type {
            efficiency[food.index()] = genes.power(id) as f64 / total as f64 * bonus;
        }
    }
    efficiency
}

impl Creature {
    pub fn energy_gain(&self, food: FoodType, amount: f64) -> f64 {
        (self.stats.food_efficiency(food) * amount).round()
    }

    pub fn energy_deficit(&self) -> f64 {
        self.energy_consumption() - self.energy
    }

    pub fn fat_deficit(&self) -> f64 {
        self.fat_capacity() - self.fat
    }

    pub fn is_hungry(&self) -> bool {
        let needs_energy = self.energy < self.energy_consumption();
        let needs_fat = self.has_gene(GeneId::Fat) && self.fat < self.fat_capacity();
        needs_energy || needs_fat
    }

    pub fn can_eat(&self, food: FoodType) -> bool {
        food_gene(food).is_some_and(|id| self.has_gene(id))
    }

    pub fn current_regeneration(&self) -> f64 {
        if self.energy >= self.energy_consumption() {
            self.stats.regeneration()
        } else {
            0.0
        }
    }

    pub fn divide_chance(&self) -> f64 {
        if self.age <= 1 {
            return 0.0;
        }
        let consumption = self.energy_consumption();
        if self.energy < consumption || consumption <= 0.0 {
            return 0.0;
        }
        let deficit_ratio = ((consumption - self.energy) / consumption).max(0.0);
        self.stats.divide_chance() * (1.0 - deficit_ratio).powi(2)
    }

    /// Eats from `food` until energy reaches consumption, then tops up fat.
    /// Returns the energy and fat gained.
    pub fn feed(&mut self, food: &mut FoodStorage) -> f64 {
        let mut gained = 0.0;

        if self.energy < self.energy_consumption() {
            let eaten = self.eat(food, self.energy_deficit());
            self.energy += eaten;
            gained += eaten;
        }

        if self.has_gene(GeneId::Fat) {
            let drawn = self.fat.min(self.energy_deficit().max(0.0));
            self.energy += drawn;
            self.fat -= drawn;

            let stored = self.eat(food, self.fat_deficit());
            self.fat += stored;
            gained += stored;
        }

        gained
    }

    fn eat(&self, food: &mut FoodStorage, deficit: f64) -> f64 {
        let mut remaining = deficit;
        for kind in food.types() {
            if remaining <= 0.0 {
                break;
            }
            let efficiency = self.stats.food_efficiency(kind);
            let stock = food.get(kind);
            if !self.can_eat(kind) || efficiency <= 0.0 || stock <= 0.0 {
                continue;
            }

            let eaten = stock.min((remaining / efficiency).ceil());
            let gained = self.energy_gain(kind, eaten).min(remaining);
            food.set(kind, stock - eaten);
            remaining -= gained;
        }
        deficit - remaining.max(0.0)
    }
}

fn food_gene(food: FoodType) -> Option<GeneId> {
    feeding_genes().find(|id| id.def().food_type == Some(food))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::genome::Gene;

    fn creature_with(ids: &[GeneId]) -> Creature {
        let mut genes = GeneSet::essential();
        for &id in ids {
            genes.insert(Gene::new(id));
        }
        Creature::new(1, genes, &CreatureConfig::default())
    }

    #[test]
    fn test_basic_stats_of_minimal_herbivore() {
        let creature = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        let stats = creature.stats();

        assert_eq!(stats.bio_mass(), 10);
        assert_eq!(stats.mass(), 10);
        assert_eq!(stats.max_hp(), 25.0);
        assert_eq!(stats.speed(), 5);
        assert_eq!(stats.regeneration(), 5.0);
        // bio mass 10 + SPEED 2 + LONGEVITY 1 + FERTILITY 1
        assert_eq!(stats.energy_consumption(), 14.0);
        assert_eq!(stats.fat_capacity(), 0.0);
        assert_eq!(stats.lifespan(), 10);
        assert_eq!(stats.divide_chance(), 0.1);
        assert_eq!(stats.food_efficiency(FoodType::Plant), 1.0);
        assert_eq!(stats.food_efficiency(FoodType::Meat), 0.0);
    }

    #[test]
    fn test_mass_includes_gene_costs() {
        let creature = creature_with(&[GeneId::Herbivore, GeneId::Hooves, GeneId::Shell, GeneId::Fat]);
        // bio mass 10 + 5, hooves 1, shell 25
        assert_eq!(creature.stats().bio_mass(), 15);
        assert_eq!(creature.mass(), 41);
        assert_eq!(creature.speed(), 1);
        assert_eq!(creature.fat_capacity(), 25.0);
    }

    #[test]
    fn test_extra_movement_types_cost_energy() {
        let walker = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        let amphibian = creature_with(&[GeneId::Herbivore, GeneId::Legs, GeneId::Fins]);
        // FINS costs 2 plus one extra movement type
        assert_eq!(
            amphibian.energy_consumption() - walker.energy_consumption(),
            2.0 + CreatureConfig::default().extra_movement_type_cost
        );
    }

    #[test]
    fn test_specialization_bonus() {
        let mut genes = GeneSet::essential();
        genes.insert(Gene::with_power(GeneId::Herbivore, 5));
        let specialist = Creature::new(1, genes, &CreatureConfig::default());
        assert!((specialist.stats().food_efficiency(FoodType::Plant) - 1.2).abs() < 1e-9);

        let mut genes = GeneSet::essential();
        genes.insert(Gene::with_power(GeneId::Herbivore, 3));
        genes.insert(Gene::new(GeneId::Scavenger));
        let generalist = Creature::new(2, genes, &CreatureConfig::default());
        assert_eq!(generalist.stats().food_efficiency(FoodType::Plant), 0.75);
        assert_eq!(generalist.stats().food_efficiency(FoodType::Carrion), 0.25);
    }

    #[test]
    fn test_pure_herbivore_can_only_eat_plants() {
        let creature = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        assert!(creature.can_eat(FoodType::Plant));
        assert!(!creature.can_eat(FoodType::Meat));
        assert!(!creature.can_eat(FoodType::Carrion));
    }

    #[test]
    fn test_feed_covers_deficit_exactly() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        creature.energy = 0.0;
        let mut food = FoodStorage::from_pairs(&[(FoodType::Plant, 1000.0)]);

        let gained = creature.feed(&mut food);

        assert!(creature.energy > 0.0);
        assert!(creature.energy <= creature.energy_consumption());
        assert_eq!(gained, creature.energy);
        assert_eq!(food.plant, 1000.0 - creature.energy);
        assert!(!creature.is_hungry());
    }

    #[test]
    fn test_feed_ignores_inedible_food() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        creature.energy = 0.0;
        let mut food = FoodStorage::from_pairs(&[(FoodType::Meat, 50.0), (FoodType::Carrion, 50.0)]);

        assert_eq!(creature.feed(&mut food), 0.0);
        assert_eq!(food.meat, 50.0);
        assert_eq!(food.carrion, 50.0);
        assert!(creature.is_hungry());
    }

    #[test]
    fn test_feed_fills_fat_after_energy() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs, GeneId::Fat]);
        creature.energy = 0.0;
        let mut food = FoodStorage::from_pairs(&[(FoodType::Plant, 1000.0)]);

        creature.feed(&mut food);

        assert_eq!(creature.energy, creature.energy_consumption());
        assert_eq!(creature.fat, creature.fat_capacity());
        assert!(!creature.is_hungry());
    }

    #[test]
    fn test_fat_is_burned_before_eating_more() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs, GeneId::Fat]);
        creature.energy = 0.0;
        creature.fat = 10.0;
        let mut food = FoodStorage::from_pairs(&[(FoodType::Plant, 5.0)]);

        creature.feed(&mut food);

        assert_eq!(food.plant, 0.0);
        assert_eq!(creature.energy, 15.0);
        assert_eq!(creature.fat, 0.0);
    }

    #[test]
    fn test_divide_chance_gates() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs]);
        assert_eq!(creature.divide_chance(), 0.0);

        creature.age = 2;
        assert_eq!(creature.divide_chance(), 0.1);

        creature.energy -= 1.0;
        assert_eq!(creature.divide_chance(), 0.0);
    }

    #[test]
    fn test_regeneration_requires_energy() {
        let mut creature = creature_with(&[GeneId::Herbivore, GeneId::Legs, GeneId::Regeneration]);
        assert_eq!(creature.current_regeneration(), 15.0);
        creature.energy = 0.0;
        assert_eq!(creature.current_regeneration(), 0.0);
    }
}
