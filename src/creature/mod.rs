pub mod genome;
pub mod metabolism;
pub mod reproduction;

use crate::combat::damage::Damage;
use crate::config::CreatureConfig;
use crate::error::{SimError, SimResult};
use crate::world::tile::Tile;
use genome::{feeding_genes, movement_genes, offensive_genes, Gene, GeneId, GeneSet};
use metabolism::BasicStats;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Serialize;

pub type CreatureId = u64;

#[derive(Debug, Clone, Serialize)]
pub struct Creature {
    pub id: CreatureId,
    pub(crate) x: usize,
    pub(crate) y: usize,
    genes: GeneSet,
    stats: BasicStats,
    pub hp: f64,
    pub energy: f64,
    pub fat: f64,
    pub age: u32,
    pub generation: u32,
    pub(crate) alive: bool,
}

impl Creature {
    pub fn new(id: CreatureId, genes: GeneSet, config: &CreatureConfig) -> Self {
        let stats = BasicStats::derive(&genes, config);
        Self {
            id,
            x: 0,
            y: 0,
            hp: stats.max_hp(),
            energy: stats.energy_consumption(),
            fat: 0.0,
            age: 0,
            generation: 0,
            alive: true,
            genes,
            stats,
        }
    }

    /// Fresh creature: the essential genes, one feeding gene, one movement
    /// gene and, for carnivores, one offensive gene. Unbiased genes are
    /// picked to suit `tile`.
    pub fn spawn<R: Rng + ?Sized>(
        id: CreatureId,
        feeding: Option<GeneId>,
        movement: Option<GeneId>,
        tile: &Tile,
        rng: &mut R,
        config: &CreatureConfig,
    ) -> SimResult<Self> {
        check_spawn_bias(feeding, movement)?;
        let mut genes = GeneSet::essential();

        let feeding = feeding
            .or_else(|| feeding_genes().choose(rng))
            .unwrap_or(GeneId::Herbivore);
        genes.insert(Gene::new(feeding));

        let movement = movement
            .or_else(|| {
                movement_genes()
                    .filter(|id| feeding == GeneId::Carnivore || !id.def().is_offensive())
                    .filter(|id| id.def().movement_types.iter().any(|&mt| tile.supports(mt)))
                    .choose(rng)
            })
            .unwrap_or(GeneId::Wings);
        genes.insert(Gene::new(movement));

        if genes.contains(GeneId::Carnivore) && genes.attack().is_zero() {
            let weapon = offensive_genes()
                .filter(|id| !genes.conflicts_with(id.def()))
                .choose(rng);
            if let Some(weapon) = weapon {
                genes.insert(Gene::new(weapon));
            }
        }

        Ok(Self::new(id, genes, config))
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn genes(&self) -> &GeneSet {
        &self.genes
    }

    pub fn stats(&self) -> &BasicStats {
        &self.stats
    }

    pub fn has_gene(&self, id: GeneId) -> bool {
        self.genes.contains(id)
    }

    pub fn gene_power(&self, id: GeneId) -> u8 {
        self.genes.power(id)
    }

    pub fn is_carnivore(&self) -> bool {
        self.has_gene(GeneId::Carnivore)
    }

    pub fn can_move_to(&self, tile: &Tile) -> bool {
        self.genes
            .movement_types()
            .into_iter()
            .any(|mt| tile.supports(mt))
    }

    pub fn mass(&self) -> u32 {
        self.stats.mass()
    }

    pub fn max_hp(&self) -> f64 {
        self.stats.max_hp()
    }

    pub fn speed(&self) -> u32 {
        self.stats.speed()
    }

    pub fn energy_consumption(&self) -> f64 {
        self.stats.energy_consumption()
    }

    pub fn fat_capacity(&self) -> f64 {
        self.stats.fat_capacity()
    }

    pub fn lifespan(&self) -> u32 {
        self.stats.lifespan()
    }

    pub fn attack(&self) -> &Damage {
        self.stats.attack()
    }

    pub fn defence(&self) -> &Damage {
        self.stats.defence()
    }

    pub fn retribution(&self) -> &Damage {
        self.stats.retribution()
    }

    pub fn death_meat(&self) -> f64 {
        self.stats.bio_mass() as f64 * 2.0
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

pub fn check_spawn_bias(feeding: Option<GeneId>, movement: Option<GeneId>) -> SimResult<()> {
    if let Some(id) = feeding {
        if !id.def().is_feeding() {
            return Err(SimError::InvalidBias(format!("{} is not a feeding gene", id)));
        }
    }
    if let Some(id) = movement {
        if !id.def().is_movement() {
            return Err(SimError::InvalidBias(format!("{} is not a movement gene", id)));
        }
        if id.def().is_offensive() && feeding != Some(GeneId::Carnivore) {
            return Err(SimError::InvalidBias(format!(
                "{} is offensive and needs the CARNIVORE feeding gene",
                id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tile::TerrainKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_creature_creation() {
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Herbivore));
        genes.insert(Gene::new(GeneId::Legs));
        let creature = Creature::new(7, genes, &CreatureConfig::default());

        assert_eq!(creature.id, 7);
        assert!(creature.is_alive());
        assert_eq!(creature.hp, creature.max_hp());
        assert_eq!(creature.energy, creature.energy_consumption());
        assert_eq!(creature.fat, 0.0);
        assert_eq!(creature.age, 0);
        assert_eq!(creature.generation, 0);
        assert_eq!(creature.death_meat(), 20.0);
    }

    #[test]
    fn test_stats_are_frozen() {
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Herbivore));
        let creature = Creature::new(1, genes.clone(), &CreatureConfig::default());
        let before = creature.stats().clone();

        genes.insert(Gene::new(GeneId::Shell));
        assert_eq!(creature.stats(), &before);
        assert!(!creature.has_gene(GeneId::Shell));
    }

    #[test]
    fn test_spawn_respects_bias() {
        let mut rng = StdRng::seed_from_u64(3);
        let tile = Tile::new(TerrainKind::Grassland, 0, 0);
        let creature = Creature::spawn(
            1,
            Some(GeneId::Herbivore),
            Some(GeneId::Legs),
            &tile,
            &mut rng,
            &CreatureConfig::default(),
        )
        .unwrap();

        assert_eq!(creature.genes().len(), 6);
        assert!(creature.has_gene(GeneId::Herbivore));
        assert!(creature.has_gene(GeneId::Legs));
        assert!(creature.can_move_to(&tile));
    }

    #[test]
    fn test_spawned_creatures_fit_their_tile() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = CreatureConfig::default();
        for kind in TerrainKind::ALL {
            let tile = Tile::new(kind, 0, 0);
            for id in 0..50 {
                let creature = Creature::spawn(id, None, None, &tile, &mut rng, &config).unwrap();
                assert!(creature.can_move_to(&tile));
                assert!(creature.genes().has_feeding_gene());
                assert_eq!(creature.is_carnivore(), !creature.attack().is_zero());
            }
        }
    }

    #[test]
    fn test_spawn_rejects_misplaced_bias() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = CreatureConfig::default();
        let tile = Tile::new(TerrainKind::Forest, 0, 0);
        let mut spawn = |feeding, movement| Creature::spawn(1, feeding, movement, &tile, &mut rng, &config);

        assert!(matches!(spawn(Some(GeneId::Shell), Some(GeneId::Legs)), Err(SimError::InvalidBias(_))));
        assert!(matches!(spawn(Some(GeneId::Legs), None), Err(SimError::InvalidBias(_))));
        assert!(matches!(spawn(Some(GeneId::Herbivore), Some(GeneId::Fangs)), Err(SimError::InvalidBias(_))));
        assert!(matches!(spawn(Some(GeneId::Herbivore), Some(GeneId::Claws)), Err(SimError::InvalidBias(_))));
        assert!(matches!(spawn(None, Some(GeneId::Claws)), Err(SimError::InvalidBias(_))));

        let climber = spawn(Some(GeneId::Carnivore), Some(GeneId::Claws)).unwrap();
        assert!(climber.is_carnivore());
        assert!(!climber.attack().is_zero());
        assert!(climber.genes().has_feeding_gene());
    }

    #[test]
    fn test_can_move_to() {
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Herbivore));
        genes.insert(Gene::new(GeneId::Legs));
        let walker = Creature::new(1, genes, &CreatureConfig::default());

        assert!(walker.can_move_to(&Tile::new(TerrainKind::Desert, 0, 0)));
        assert!(!walker.can_move_to(&Tile::new(TerrainKind::Sea, 0, 0)));
        assert!(!walker.can_move_to(&Tile::new(TerrainKind::HighMountains, 0, 0)));
    }
}
