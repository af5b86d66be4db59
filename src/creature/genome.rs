use crate::combat::damage::Damage;
use crate::error::SimError;
use crate::world::resources::FoodType;
use crate::world::tile::MovementType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const GENE_POWER_MIN: u8 = 1;
pub const GENE_POWER_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneId {
    Mass,
    Speed,
    Longevity,
    Fertility,
    Fat,
    Regeneration,
    Herbivore,
    Carnivore,
    Scavenger,
    Legs,
    Wings,
    Fins,
    Hooves,
    Claws,
    Fangs,
    Sting,
    FireBreath,
    AcidSpit,
    Fur,
    Chitin,
    Scales,
    Shell,
    Needles,
    Spikes,
    Horns,
    BurningSkin,
    AcidSkin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusiveFlag {
    Legs,
    LimbEnd,
    ElementalBreath,
    SkinArmor,
    SkinProtrusions,
    HeadProtrusions,
    ElementalSkin,
}

/// Static description of a gene. Per-power contributions are scaled by the
/// instance's power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneDef {
    pub id: GeneId,
    pub is_essential: bool,
    pub energy_cost: u32,
    pub mass_cost: u32,
    pub attack: Option<Damage>,
    pub defence: Option<Damage>,
    pub retribution: Option<Damage>,
    pub food_type: Option<FoodType>,
    pub movement_types: &'static [MovementType],
    pub exclusive_flags: &'static [ExclusiveFlag],
}

impl GeneDef {
    const fn base(id: GeneId, energy_cost: u32) -> Self {
        Self {
            id,
            is_essential: false,
            energy_cost,
            mass_cost: 0,
            attack: None,
            defence: None,
            retribution: None,
            food_type: None,
            movement_types: &[],
            exclusive_flags: &[],
        }
    }

    pub fn conflicts_with(&self, other: &GeneDef) -> bool {
        self.exclusive_flags
            .iter()
            .any(|flag| other.exclusive_flags.contains(flag))
    }

    pub fn is_feeding(&self) -> bool {
        self.food_type.is_some()
    }

    pub fn is_offensive(&self) -> bool {
        self.attack.is_some()
    }

    pub fn is_movement(&self) -> bool {
        !self.movement_types.is_empty()
    }
}

const fn physical(amount: f64) -> Damage {
    Damage { physical: amount, ..Damage::ZERO }
}

const fn essential(id: GeneId, energy_cost: u32) -> GeneDef {
    GeneDef { is_essential: true, ..GeneDef::base(id, energy_cost) }
}

use ExclusiveFlag as X;
use MovementType as M;

const MASS: GeneDef = essential(GeneId::Mass, 0);
const SPEED: GeneDef = essential(GeneId::Speed, 2);
const LONGEVITY: GeneDef = essential(GeneId::Longevity, 1);
const FERTILITY: GeneDef = essential(GeneId::Fertility, 1);

const FAT: GeneDef = GeneDef::base(GeneId::Fat, 5);
const REGENERATION: GeneDef = GeneDef::base(GeneId::Regeneration, 1);

const HERBIVORE: GeneDef = GeneDef { food_type: Some(FoodType::Plant), ..GeneDef::base(GeneId::Herbivore, 0) };
const CARNIVORE: GeneDef = GeneDef { food_type: Some(FoodType::Meat), ..GeneDef::base(GeneId::Carnivore, 0) };
const SCAVENGER: GeneDef = GeneDef { food_type: Some(FoodType::Carrion), ..GeneDef::base(GeneId::Scavenger, 0) };

const LEGS: GeneDef = GeneDef {
    movement_types: &[M::Walk],
    exclusive_flags: &[X::Legs],
    ..GeneDef::base(GeneId::Legs, 0)
};
const WINGS: GeneDef = GeneDef { movement_types: &[M::Fly], ..GeneDef::base(GeneId::Wings, 5) };
const FINS: GeneDef = GeneDef { movement_types: &[M::Swim], ..GeneDef::base(GeneId::Fins, 2) };
const HOOVES: GeneDef = GeneDef {
    mass_cost: 1,
    movement_types: &[M::Walk, M::Climb],
    exclusive_flags: &[X::Legs, X::LimbEnd],
    ..GeneDef::base(GeneId::Hooves, 1)
};

const CLAWS: GeneDef = GeneDef {
    attack: Some(physical(25.0)),
    movement_types: &[M::Climb],
    exclusive_flags: &[X::LimbEnd],
    ..GeneDef::base(GeneId::Claws, 1)
};
const FANGS: GeneDef = GeneDef { attack: Some(physical(25.0)), ..GeneDef::base(GeneId::Fangs, 1) };
const STING: GeneDef = GeneDef { attack: Some(physical(15.0)), ..GeneDef::base(GeneId::Sting, 2) };
const FIRE_BREATH: GeneDef = GeneDef {
    attack: Some(Damage { fire: 25.0, ..Damage::ZERO }),
    exclusive_flags: &[X::ElementalBreath],
    ..GeneDef::base(GeneId::FireBreath, 4)
};
const ACID_SPIT: GeneDef = GeneDef {
    attack: Some(Damage { acid: 25.0, ..Damage::ZERO }),
    exclusive_flags: &[X::ElementalBreath],
    ..GeneDef::base(GeneId::AcidSpit, 4)
};

const FUR: GeneDef = GeneDef {
    defence: Some(Damage { physical: 2.0, cold: 20.0, ..Damage::ZERO }),
    exclusive_flags: &[X::SkinArmor],
    ..GeneDef::base(GeneId::Fur, 1)
};
const CHITIN: GeneDef = GeneDef {
    mass_cost: 1,
    defence: Some(Damage { physical: 5.0, fire: 2.0, acid: 10.0, ..Damage::ZERO }),
    exclusive_flags: &[X::SkinArmor],
    ..GeneDef::base(GeneId::Chitin, 1)
};
const SCALES: GeneDef = GeneDef {
    mass_cost: 5,
    defence: Some(Damage { physical: 25.0, fire: 5.0, ..Damage::ZERO }),
    exclusive_flags: &[X::SkinArmor],
    ..GeneDef::base(GeneId::Scales, 2)
};
const SHELL: GeneDef = GeneDef {
    mass_cost: 25,
    defence: Some(Damage { physical: 50.0, acid: 5.0, ..Damage::ZERO }),
    exclusive_flags: &[X::SkinArmor],
    ..GeneDef::base(GeneId::Shell, 4)
};

const NEEDLES: GeneDef = GeneDef {
    mass_cost: 1,
    retribution: Some(physical(2.0)),
    exclusive_flags: &[X::SkinProtrusions],
    ..GeneDef::base(GeneId::Needles, 1)
};
const SPIKES: GeneDef = GeneDef {
    mass_cost: 5,
    retribution: Some(physical(10.0)),
    exclusive_flags: &[X::SkinProtrusions],
    ..GeneDef::base(GeneId::Spikes, 2)
};
const HORNS: GeneDef = GeneDef {
    mass_cost: 5,
    retribution: Some(physical(15.0)),
    exclusive_flags: &[X::HeadProtrusions],
    ..GeneDef::base(GeneId::Horns, 2)
};
const BURNING_SKIN: GeneDef = GeneDef {
    defence: Some(Damage { fire: 25.0, ..Damage::ZERO }),
    retribution: Some(Damage { fire: 10.0, ..Damage::ZERO }),
    exclusive_flags: &[X::ElementalSkin],
    ..GeneDef::base(GeneId::BurningSkin, 4)
};
const ACID_SKIN: GeneDef = GeneDef {
    defence: Some(Damage { acid: 25.0, ..Damage::ZERO }),
    retribution: Some(Damage { acid: 10.0, ..Damage::ZERO }),
    exclusive_flags: &[X::ElementalSkin],
    ..GeneDef::base(GeneId::AcidSkin, 4)
};

pub const ESSENTIAL_GENES: [GeneId; 4] = [
    GeneId::Mass,
    GeneId::Speed,
    GeneId::Longevity,
    GeneId::Fertility,
];

pub const NON_ESSENTIAL_GENES: [GeneId; 23] = [
    GeneId::Fat,
    GeneId::Regeneration,
    // feeding
    GeneId::Herbivore,
    GeneId::Carnivore,
    GeneId::Scavenger,
    // movement
    GeneId::Legs,
    GeneId::Wings,
    GeneId::Fins,
    GeneId::Hooves,
    // offensive
    GeneId::Claws,
    GeneId::Fangs,
    GeneId::Sting,
    GeneId::FireBreath,
    GeneId::AcidSpit,
    // defensive
    GeneId::Fur,
    GeneId::Chitin,
    GeneId::Scales,
    GeneId::Shell,
    // retribution
    GeneId::Needles,
    GeneId::Spikes,
    GeneId::Horns,
    GeneId::BurningSkin,
    GeneId::AcidSkin,
];

impl GeneId {
    pub fn def(self) -> &'static GeneDef {
        match self {
            GeneId::Mass => &MASS,
            GeneId::Speed => &SPEED,
            GeneId::Longevity => &LONGEVITY,
            GeneId::Fertility => &FERTILITY,
            GeneId::Fat => &FAT,
            GeneId::Regeneration => &REGENERATION,
            GeneId::Herbivore => &HERBIVORE,
            GeneId::Carnivore => &CARNIVORE,
            GeneId::Scavenger => &SCAVENGER,
            GeneId::Legs => &LEGS,
            GeneId::Wings => &WINGS,
            GeneId::Fins => &FINS,
            GeneId::Hooves => &HOOVES,
            GeneId::Claws => &CLAWS,
            GeneId::Fangs => &FANGS,
            GeneId::Sting => &STING,
            GeneId::FireBreath => &FIRE_BREATH,
            GeneId::AcidSpit => &ACID_SPIT,
            GeneId::Fur => &FUR,
            GeneId::Chitin => &CHITIN,
            GeneId::Scales => &SCALES,
            GeneId::Shell => &SHELL,
            GeneId::Needles => &NEEDLES,
            GeneId::Spikes => &SPIKES,
            GeneId::Horns => &HORNS,
            GeneId::BurningSkin => &BURNING_SKIN,
            GeneId::AcidSkin => &ACID_SKIN,
        }
    }

    pub fn all() -> impl Iterator<Item = GeneId> {
        ESSENTIAL_GENES.into_iter().chain(NON_ESSENTIAL_GENES)
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneId::Mass => "MASS",
            GeneId::Speed => "SPEED",
            GeneId::Longevity => "LONGEVITY",
            GeneId::Fertility => "FERTILITY",
            GeneId::Fat => "FAT",
            GeneId::Regeneration => "REGENERATION",
            GeneId::Herbivore => "HERBIVORE",
            GeneId::Carnivore => "CARNIVORE",
            GeneId::Scavenger => "SCAVENGER",
            GeneId::Legs => "LEGS",
            GeneId::Wings => "WINGS",
            GeneId::Fins => "FINS",
            GeneId::Hooves => "HOOVES",
            GeneId::Claws => "CLAWS",
            GeneId::Fangs => "FANGS",
            GeneId::Sting => "STING",
            GeneId::FireBreath => "FIRE_BREATH",
            GeneId::AcidSpit => "ACID_SPIT",
            GeneId::Fur => "FUR",
            GeneId::Chitin => "CHITIN",
            GeneId::Scales => "SCALES",
            GeneId::Shell => "SHELL",
            GeneId::Needles => "NEEDLES",
            GeneId::Spikes => "SPIKES",
            GeneId::Horns => "HORNS",
            GeneId::BurningSkin => "BURNING_SKIN",
            GeneId::AcidSkin => "ACID_SKIN",
        }
    }
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        GeneId::all()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| SimError::UnknownGene(s.to_string()))
    }
}

pub fn feeding_genes() -> impl Iterator<Item = GeneId> {
    NON_ESSENTIAL_GENES.into_iter().filter(|id| id.def().is_feeding())
}

pub fn movement_genes() -> impl Iterator<Item = GeneId> {
    NON_ESSENTIAL_GENES.into_iter().filter(|id| id.def().is_movement())
}

pub fn offensive_genes() -> impl Iterator<Item = GeneId> {
    NON_ESSENTIAL_GENES.into_iter().filter(|id| id.def().is_offensive())
}

pub fn required_gene(food: FoodType) -> GeneId {
    match food {
        FoodType::Plant => GeneId::Herbivore,
        FoodType::Meat => GeneId::Carnivore,
        FoodType::Carrion => GeneId::Scavenger,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub id: GeneId,
    pub power: u8,
}

impl Gene {
    pub fn new(id: GeneId) -> Self {
        Self::with_power(id, GENE_POWER_MIN)
    }

    pub fn with_power(id: GeneId, power: u8) -> Self {
        Self {
            id,
            power: power.min(GENE_POWER_MAX),
        }
    }

    pub fn def(&self) -> &'static GeneDef {
        self.id.def()
    }

    pub fn mutate_up(&mut self) {
        self.power = (self.power + 1).min(GENE_POWER_MAX);
    }

    pub fn mutate_down(&mut self) {
        if self.def().is_essential && self.power <= GENE_POWER_MIN {
            return;
        }
        self.power = self.power.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.power < GENE_POWER_MIN
    }

    fn scaled(&self, template: Option<Damage>) -> Damage {
        template
            .map(|damage| damage.multiply(self.power as f64))
            .unwrap_or(Damage::ZERO)
    }

    pub fn attack(&self) -> Damage {
        self.scaled(self.def().attack)
    }

    pub fn defence(&self) -> Damage {
        self.scaled(self.def().defence)
    }

    pub fn retribution(&self) -> Damage {
        self.scaled(self.def().retribution)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneSet {
    genes: BTreeMap<GeneId, Gene>,
}

impl GeneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: &[GeneId], power: u8) -> Self {
        let mut set = Self::new();
        for &id in ids {
            set.insert(Gene::with_power(id, power));
        }
        set
    }

    pub fn essential() -> Self {
        Self::from_ids(&ESSENTIAL_GENES, GENE_POWER_MIN)
    }

    pub fn insert(&mut self, gene: Gene) {
        self.genes.insert(gene.id, gene);
    }

    pub fn remove(&mut self, id: GeneId) -> Option<Gene> {
        self.genes.remove(&id)
    }

    pub fn contains(&self, id: GeneId) -> bool {
        self.genes.contains_key(&id)
    }

    pub fn get(&self, id: GeneId) -> Option<&Gene> {
        self.genes.get(&id)
    }

    pub fn get_mut(&mut self, id: GeneId) -> Option<&mut Gene> {
        self.genes.get_mut(&id)
    }

    pub fn power(&self, id: GeneId) -> u8 {
        self.get(id).map(|gene| gene.power).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = GeneId> + '_ {
        self.genes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn has_feeding_gene(&self) -> bool {
        self.iter().any(|gene| gene.def().is_feeding())
    }

    /// True if any carried gene shares an exclusivity tag with `candidate`.
    pub fn conflicts_with(&self, candidate: &GeneDef) -> bool {
        self.iter().any(|gene| gene.def().conflicts_with(candidate))
    }

    pub fn attack(&self) -> Damage {
        self.iter().fold(Damage::ZERO, |acc, gene| acc.add(&gene.attack()))
    }

    pub fn defence(&self) -> Damage {
        self.iter().fold(Damage::ZERO, |acc, gene| acc.add(&gene.defence()))
    }

    pub fn retribution(&self) -> Damage {
        self.iter().fold(Damage::ZERO, |acc, gene| acc.add(&gene.retribution()))
    }

    pub fn movement_types(&self) -> Vec<MovementType> {
        let mut types: Vec<MovementType> = self
            .iter()
            .flat_map(|gene| gene.def().movement_types.iter().copied())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}
