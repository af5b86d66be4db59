pub mod damage;

use crate::config::CombatConfig;
use crate::creature::{Creature, CreatureId};
use crate::error::SimResult;
use crate::world::resources::{FoodStorage, FoodType};
use crate::world::World;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuntOutcome {
    pub hunter: CreatureId,
    pub prey: CreatureId,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub prey_killed: bool,
    pub hunter_killed: bool,
    pub meat: f64,
    pub eaten: f64,
}

pub fn size_factor(attacker: &Creature, defender: &Creature, config: &CombatConfig) -> f64 {
    let (a, d) = (attacker.mass() as f64, defender.mass() as f64);
    if a >= config.size_ratio_threshold * d {
        config.size_advantage
    } else if d >= config.size_ratio_threshold * a {
        1.0 / config.size_advantage
    } else {
        1.0
    }
}

pub fn effective_attack(hunter: &Creature, prey: &Creature, config: &CombatConfig) -> f64 {
    hunter
        .attack()
        .multiply(size_factor(hunter, prey, config))
        .subtract(prey.defence())
        .sum()
}

pub fn effective_retribution(hunter: &Creature, prey: &Creature, config: &CombatConfig) -> f64 {
    prey.retribution()
        .add(prey.attack())
        .multiply(size_factor(prey, hunter, config))
        .subtract(hunter.defence())
        .sum()
}

pub fn prey_score(hunter: &Creature, prey: &Creature, config: &CombatConfig) -> f64 {
    let appetite = hunter.energy_deficit() + hunter.fat_deficit();
    prey.death_meat().min(appetite) - effective_retribution(hunter, prey, config)
        + effective_attack(hunter, prey, config).min(prey.hp)
}

pub fn is_hunter(creature: &Creature) -> bool {
    creature.alive && creature.is_carnivore() && !creature.attack().is_zero() && creature.is_hungry()
}

pub fn choose_prey(world: &World, hunter_id: CreatureId, config: &CombatConfig) -> SimResult<Option<CreatureId>> {
    let hunter = world.creature(hunter_id)?;
    let (x, y) = hunter.position();

    let mut best: Option<(CreatureId, f64)> = None;
    for prey in world.creatures_at(x, y) {
        if prey.id == hunter_id {
            continue;
        }
        let score = prey_score(hunter, prey, config);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((prey.id, score));
        }
    }
    Ok(best.map(|(id, _)| id))
}

/// Runs one engagement for `hunter_id`. `Ok(None)` when the creature is not
/// hunting or finds no prey.
pub fn hunt(world: &mut World, hunter_id: CreatureId, config: &CombatConfig) -> SimResult<Option<HuntOutcome>> {
    if !is_hunter(world.creature(hunter_id)?) {
        return Ok(None);
    }
    let Some(prey_id) = choose_prey(world, hunter_id, config)? else {
        return Ok(None);
    };

    let hunter = world.creature(hunter_id)?;
    let prey = world.creature(prey_id)?;
    let dealt = effective_attack(hunter, prey, config).round();
    let taken = effective_retribution(hunter, prey, config).round();
    let (x, y) = hunter.position();

    world.creature_mut(prey_id)?.hp -= dealt;
    world.creature_mut(hunter_id)?.hp -= taken;

    let mut pool = FoodStorage::new();
    let prey_killed = world.creature(prey_id)?.hp <= 0.0;
    if prey_killed {
        let corpse = world.remove_creature(prey_id)?;
        pool.add(FoodType::Meat, corpse.death_meat());
    }
    let hunter_killed = world.creature(hunter_id)?.hp <= 0.0;
    if hunter_killed {
        let corpse = world.remove_creature(hunter_id)?;
        pool.add(FoodType::Meat, corpse.death_meat());
    }

    let meat = pool.meat;
    let eaten = if hunter_killed {
        0.0
    } else {
        world.creature_mut(hunter_id)?.feed(&mut pool)
    };
    world.tile_mut(x, y)?.food.add(FoodType::Carrion, pool.meat);

    Ok(Some(HuntOutcome {
        hunter: hunter_id,
        prey: prey_id,
        damage_dealt: dealt,
        damage_taken: taken,
        prey_killed,
        hunter_killed,
        meat,
        eaten,
    }))
}
