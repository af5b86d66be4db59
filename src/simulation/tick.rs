use super::{feeding, movement, SimulationState};
use crate::combat;
use crate::creature::CreatureId;
use crate::error::SimResult;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnReport {
    pub spawned: usize,
    pub died: usize,
    pub moved: usize,
    pub food_eaten: f64,
    pub hunts: usize,
    pub kills: usize,
    pub births: usize,
}

impl SimulationState {
    pub fn process_turn(&mut self) -> SimResult<TurnReport> {
        let mut report = TurnReport::default();

        self.world.refresh_tiles(&self.config.food);
        report.spawned = self.populate()?;
        report.died = self.apply_survival()?;
        self.world.remove_dead();
        for creature in self.world.creatures_mut() {
            creature.energy = 0.0;
        }
        report.moved = self.move_creatures()?;
        report.food_eaten = feeding::feed_creatures(&mut self.world)?;
        let (hunts, kills) = self.hunt()?;
        report.hunts = hunts;
        report.kills = kills;
        report.births = self.procreate()?;
        for creature in self.world.creatures_mut() {
            creature.age += 1;
        }

        self.tick += 1;
        self.total_deaths += (report.died + report.kills) as u64;
        self.total_births += report.births as u64;

        log::debug!(
            "tick {}: spawned {}, died {}, moved {}, ate {:.0}, hunts {} ({} kills), births {}",
            self.tick,
            report.spawned,
            report.died,
            report.moved,
            report.food_eaten,
            report.hunts,
            report.kills,
            report.births
        );
        if self.world.population() == 0 {
            log::warn!("tick {}: world is empty", self.tick);
        }

        Ok(report)
    }

    fn populate(&mut self) -> SimResult<usize> {
        let missing = self
            .config
            .population
            .base_creature_count
            .saturating_sub(self.world.population());
        let mut spawned = self.spawn_creatures(missing)?;

        if self.rng.gen::<f64>() < self.config.population.bonus_spawn_chance {
            spawned += self.spawn_creatures(self.config.population.bonus_spawn_count)?;
        }
        Ok(spawned)
    }

    fn apply_survival(&mut self) -> SimResult<usize> {
        let mut dead = Vec::new();
        for creature in self.world.creatures_mut() {
            creature.hp = (creature.hp + creature.current_regeneration()).min(creature.max_hp());
            if creature.energy < creature.energy_consumption() {
                creature.hp -= creature.energy_deficit().max(0.0);
            }
            if creature.hp <= 0.0 || creature.age >= creature.lifespan() {
                dead.push(creature.id);
            }
        }

        for &id in &dead {
            self.world.kill_creature(id)?;
        }
        Ok(dead.len())
    }

    /// Slowest creatures move first.
    fn move_creatures(&mut self) -> SimResult<usize> {
        let mut order: Vec<(u32, CreatureId)> =
            self.world.creatures().map(|c| (c.speed(), c.id)).collect();
        order.sort_by_key(|&(speed, _)| speed);

        let mut moved = 0;
        for (_, id) in order {
            if movement::move_creature(&mut self.world, id, &mut self.rng, &self.config.creature)? {
                moved += 1;
            }
        }
        Ok(moved)
    }

    fn hunt(&mut self) -> SimResult<(usize, usize)> {
        let (mut hunts, mut kills) = (0, 0);
        for id in self.world.creature_ids() {
            // already eaten this turn
            if self.world.creature(id).is_err() {
                continue;
            }
            if let Some(outcome) = combat::hunt(&mut self.world, id, &self.config.combat)? {
                log::debug!(
                    "creature {} attacked {}: dealt {}, took {}",
                    outcome.hunter,
                    outcome.prey,
                    outcome.damage_dealt,
                    outcome.damage_taken
                );
                hunts += 1;
                kills += outcome.prey_killed as usize + outcome.hunter_killed as usize;
            }
        }
        Ok((hunts, kills))
    }

    fn procreate(&mut self) -> SimResult<usize> {
        let mut newborns = Vec::new();
        for id in self.world.creature_ids() {
            let chance = self.world.creature(id)?.divide_chance();
            if self.rng.gen::<f64>() >= chance {
                continue;
            }

            let child_id = self.allocate_id();
            let parent = self.world.creature(id)?;
            let (child, outcome) = parent.divide(child_id, &mut self.rng, &self.config);
            if !outcome.is_empty() {
                log::debug!(
                    "creature {} born to {}: mutated {:?}, gained {:?}, lost {:?}",
                    child_id,
                    id,
                    outcome.mutated,
                    outcome.gained,
                    outcome.lost
                );
            }

            let (x, y) = child.position();
            if child.can_move_to(self.world.tile(x, y)?) {
                newborns.push(child);
            }
        }

        let mut births = 0;
        for child in newborns {
            let (x, y) = child.position();
            if self.world.add_creature(child, x, y)? {
                births += 1;
            }
        }
        Ok(births)
    }
}
