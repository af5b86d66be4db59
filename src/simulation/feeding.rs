use crate::creature::genome::GeneId;
use crate::creature::{Creature, CreatureId};
use crate::error::SimResult;
use crate::world::resources::{FoodStorage, FoodType};
use crate::world::World;

pub fn feed_creatures(world: &mut World) -> SimResult<f64> {
    let mut populated: Vec<(usize, usize)> = world
        .creatures()
        .filter(|c| c.alive)
        .map(|c| c.position())
        .collect();
    populated.sort_by_key(|&(x, y)| (y, x));
    populated.dedup();

    let mut gained = 0.0;
    for (x, y) in populated {
        gained += feed_tile(world, x, y)?;
    }
    Ok(gained)
}

/// Splits the tile's food evenly among the hungry, cheapest eaters first,
/// for as long as that satisfies someone. Whoever is still hungry then
/// competes for the rest, fastest first.
pub fn feed_tile(world: &mut World, x: usize, y: usize) -> SimResult<f64> {
    let mut hungry: Vec<CreatureId> = world
        .creatures_at(x, y)
        .into_iter()
        .filter(|c| c.has_gene(GeneId::Herbivore) || c.has_gene(GeneId::Scavenger))
        .map(|c| c.id)
        .collect();
    if hungry.is_empty() {
        return Ok(0.0);
    }
    sort_by_key_f64(world, &mut hungry, |c| c.energy_consumption())?;

    let mut food = world.tile(x, y)?.food;
    let mut gained = 0.0;

    while !hungry.is_empty() {
        let eaters = hungry.len() as f64;
        let mut guaranteed = FoodStorage::new();
        let mut contested = FoodStorage::new();
        for kind in FoodType::ALL {
            let stock = food.get(kind);
            let share = (stock / eaters).floor();
            guaranteed.set(kind, share);
            contested.set(kind, stock - share * eaters);
        }

        food = contested;
        let mut satisfied = Vec::new();
        for &id in &hungry {
            let mut share = guaranteed;
            let creature = world.creature_mut(id)?;
            gained += creature.feed(&mut share);
            food.absorb(&share);
            if !creature.is_hungry() {
                satisfied.push(id);
            }
        }

        if satisfied.is_empty() {
            break;
        }
        hungry.retain(|id| !satisfied.contains(id));
    }

    if !hungry.is_empty() {
        sort_by_key_f64(world, &mut hungry, |c| -(c.speed() as f64))?;
        for id in hungry {
            gained += world.creature_mut(id)?.feed(&mut food);
        }
    }

    world.tile_mut(x, y)?.food = food;
    Ok(gained)
}

fn sort_by_key_f64(
    world: &World,
    ids: &mut Vec<CreatureId>,
    key: impl Fn(&Creature) -> f64,
) -> SimResult<()> {
    let mut keyed = Vec::with_capacity(ids.len());
    for &id in ids.iter() {
        keyed.push((key(world.creature(id)?), id));
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    *ids = keyed.into_iter().map(|(_, id)| id).collect();
    Ok(())
}
