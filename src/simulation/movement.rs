use crate::config::CreatureConfig;
use crate::creature::{Creature, CreatureId};
use crate::error::SimResult;
use crate::world::World;
use rand::seq::SliceRandom;
use rand::Rng;

/// How attractive `(x, y)` is to `creature`: edible food shared among the
/// other occupants, a bonus for leaving the current tile and, for
/// carnivores, the meat standing on it.
pub fn tile_score(
    world: &World,
    creature: &Creature,
    x: usize,
    y: usize,
    config: &CreatureConfig,
) -> SimResult<f64> {
    let tile = world.tile(x, y)?;
    let others: Vec<&Creature> = world
        .creatures_at(x, y)
        .into_iter()
        .filter(|other| other.id != creature.id)
        .collect();

    let food: f64 = tile
        .food
        .types()
        .into_iter()
        .filter(|&kind| creature.can_eat(kind))
        .map(|kind| creature.energy_gain(kind, tile.food.get(kind)))
        .sum();
    let mut score = food / others.len().max(1) as f64;

    if (x, y) != creature.position() {
        score += config.exploration_bonus;
    }
    if creature.is_carnivore() {
        score += others.iter().map(|other| other.death_meat()).sum::<f64>();
    }
    Ok(score)
}

pub fn candidate_tiles(world: &World, creature: &Creature) -> SimResult<Vec<(usize, usize)>> {
    let (x, y) = creature.position();
    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(5);
    for pos in world.adjacent_positions(x, y)?.into_iter().chain([(x, y)]) {
        if candidates.contains(&pos) {
            continue;
        }
        if creature.can_move_to(world.tile(pos.0, pos.1)?) {
            candidates.push(pos);
        }
    }
    Ok(candidates)
}

pub fn choose_destination<R: Rng + ?Sized>(
    world: &World,
    id: CreatureId,
    rng: &mut R,
    config: &CreatureConfig,
) -> SimResult<Option<(usize, usize)>> {
    let creature = world.creature(id)?;
    let candidates = candidate_tiles(world, creature)?;
    if candidates.len() < 2 {
        return Ok(None);
    }

    let mut scored = Vec::with_capacity(candidates.len());
    for (x, y) in candidates {
        scored.push(((x, y), tile_score(world, creature, x, y, config)?));
    }
    let best = scored
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);
    let top: Vec<(usize, usize)> = scored
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(pos, _)| pos)
        .collect();

    Ok(top.choose(rng).copied())
}

pub fn move_creature<R: Rng + ?Sized>(
    world: &mut World,
    id: CreatureId,
    rng: &mut R,
    config: &CreatureConfig,
) -> SimResult<bool> {
    let Some((x, y)) = choose_destination(world, id, rng, config)? else {
        return Ok(false);
    };
    if (x, y) == world.creature(id)?.position() {
        return Ok(false);
    }

    let moved = world.move_creature(id, x, y)?;
    if moved {
        log::trace!("creature {} moved to ({}, {})", id, x, y);
    }
    Ok(moved)
}
