pub mod feeding;
pub mod movement;
pub mod tick;

use crate::config::Config;
use crate::creature::genome::GeneId;
use crate::creature::{check_spawn_bias, Creature, CreatureId};
use crate::error::SimResult;
use crate::stats::{CreatureSnapshot, SimulationMetrics, TileSnapshot};
use crate::world::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct SimulationState {
    pub world: World,
    pub config: Config,
    rng: StdRng,
    pub tick: u64,
    pub(crate) next_creature_id: CreatureId,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl SimulationState {
    pub fn new(config: Config) -> SimResult<Self> {
        check_spawn_bias(config.population.feeding_gene, config.population.movement_gene)?;

        let mut rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let world = match &config.world.map_path {
            Some(path) => World::load_from_file(path)?,
            None => World::generate(
                config.world.width,
                config.world.height,
                config.world.grassland_chance,
                &mut rng,
            )?,
        };

        Ok(Self::with_world(world, config, rng))
    }

    pub fn with_world(world: World, config: Config, rng: StdRng) -> Self {
        Self {
            world,
            config,
            rng,
            tick: 0,
            next_creature_id: 0,
            total_births: 0,
            total_deaths: 0,
        }
    }

    pub fn with_seed(world: World, config: Config, seed: u64) -> Self {
        Self::with_world(world, config, StdRng::seed_from_u64(seed))
    }

    pub fn next_creature_id(&self) -> CreatureId {
        self.next_creature_id
    }

    fn allocate_id(&mut self) -> CreatureId {
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        id
    }

    pub fn create_creature(
        &mut self,
        feeding: Option<GeneId>,
        movement: Option<GeneId>,
        x: usize,
        y: usize,
    ) -> SimResult<Creature> {
        let id = self.allocate_id();
        let tile = self.world.tile(x, y)?;
        Creature::spawn(id, feeding, movement, tile, &mut self.rng, &self.config.creature)
    }

    /// Spawns one creature on a random tile using the configured gene bias.
    /// `None` when the tile had no room for it or the bias does not suit it.
    pub fn spawn_creature(&mut self) -> SimResult<Option<CreatureId>> {
        let x = self.rng.gen_range(0..self.world.width());
        let y = self.rng.gen_range(0..self.world.height());
        let (feeding, movement) = (
            self.config.population.feeding_gene,
            self.config.population.movement_gene,
        );

        let creature = self.create_creature(feeding, movement, x, y)?;
        let id = creature.id;
        if !creature.can_move_to(self.world.tile(x, y)?) {
            return Ok(None);
        }
        if self.world.add_creature(creature, x, y)? {
            log::debug!("spawned creature {} at ({}, {})", id, x, y);
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }

    pub fn spawn_creatures(&mut self, count: usize) -> SimResult<usize> {
        let mut placed = 0;
        for _ in 0..count {
            if self.spawn_creature()?.is_some() {
                placed += 1;
            }
        }
        Ok(placed)
    }

    pub fn metrics(&self) -> SimulationMetrics {
        SimulationMetrics::compute(
            self.tick,
            self.world.creatures(),
            self.world.total_food(),
            self.total_births,
            self.total_deaths,
        )
    }

    pub fn tile_snapshot(&self, x: usize, y: usize) -> SimResult<TileSnapshot> {
        let tile = self.world.tile(x, y)?;
        Ok(TileSnapshot::capture(&self.world, tile))
    }

    pub fn creature_snapshot(&self, id: CreatureId) -> SimResult<CreatureSnapshot> {
        self.world.creature(id).map(CreatureSnapshot::from)
    }

    pub fn creature_snapshots(&self) -> Vec<CreatureSnapshot> {
        self.world.creatures().map(CreatureSnapshot::from).collect()
    }
}
