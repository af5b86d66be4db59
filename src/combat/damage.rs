use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Electric,
    Acid,
}

impl DamageType {
    pub const ALL: [DamageType; 5] = [
        DamageType::Physical,
        DamageType::Fire,
        DamageType::Cold,
        DamageType::Electric,
        DamageType::Acid,
    ];
}

/// Amount of damage per category. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Damage {
    pub physical: f64,
    pub fire: f64,
    pub cold: f64,
    pub electric: f64,
    pub acid: f64,
}

impl Damage {
    pub const ZERO: Damage = Damage {
        physical: 0.0,
        fire: 0.0,
        cold: 0.0,
        electric: 0.0,
        acid: 0.0,
    };

    /// Builds a vector from a partial mapping; missing categories are zero.
    pub fn from_pairs(pairs: &[(DamageType, f64)]) -> Self {
        let mut damage = Damage::ZERO;
        for &(kind, amount) in pairs {
            damage.set(kind, amount);
        }
        damage
    }

    pub fn types(&self) -> [DamageType; 5] {
        DamageType::ALL
    }

    pub fn get(&self, kind: DamageType) -> f64 {
        match kind {
            DamageType::Physical => self.physical,
            DamageType::Fire => self.fire,
            DamageType::Cold => self.cold,
            DamageType::Electric => self.electric,
            DamageType::Acid => self.acid,
        }
    }

    pub fn set(&mut self, kind: DamageType, amount: f64) {
        let slot = match kind {
            DamageType::Physical => &mut self.physical,
            DamageType::Fire => &mut self.fire,
            DamageType::Cold => &mut self.cold,
            DamageType::Electric => &mut self.electric,
            DamageType::Acid => &mut self.acid,
        };
        *slot = amount;
    }

    fn map2(&self, other: &Damage, f: impl Fn(f64, f64) -> f64) -> Damage {
        let mut result = Damage::ZERO;
        for kind in DamageType::ALL {
            result.set(kind, f(self.get(kind), other.get(kind)));
        }
        result
    }

    pub fn add(&self, other: &Damage) -> Damage {
        self.map2(other, |a, b| a + b)
    }

    /// Per-category subtraction, saturating at zero.
    pub fn subtract(&self, other: &Damage) -> Damage {
        self.map2(other, |a, b| (a - b).max(0.0))
    }

    pub fn multiply(&self, factor: f64) -> Damage {
        self.map2(&Damage::ZERO, |a, _| a * factor)
    }

    pub fn sum(&self) -> f64 {
        DamageType::ALL.iter().map(|&kind| self.get(kind)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.sum() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_defaults_missing_to_zero() {
        let damage = Damage::from_pairs(&[(DamageType::Fire, 10.0)]);
        assert_eq!(damage.fire, 10.0);
        assert_eq!(damage.physical, 0.0);
        assert_eq!(damage.sum(), 10.0);
    }

    #[test]
    fn test_subtract_never_negative() {
        let small = Damage::from_pairs(&[(DamageType::Physical, 5.0), (DamageType::Acid, 1.0)]);
        let big = Damage::from_pairs(&[
            (DamageType::Physical, 50.0),
            (DamageType::Cold, 3.0),
            (DamageType::Acid, 0.5),
        ]);

        let result = small.subtract(&big);
        for kind in result.types() {
            assert!(result.get(kind) >= 0.0);
        }
        assert_eq!(result.acid, 0.5);
        assert_eq!(result.physical, 0.0);
    }

    #[test]
    fn test_add_sums_componentwise() {
        let a = Damage::from_pairs(&[(DamageType::Physical, 25.0), (DamageType::Fire, 2.0)]);
        let b = Damage::from_pairs(&[(DamageType::Fire, 3.0), (DamageType::Electric, 7.0)]);

        let c = a.add(&b);
        assert_eq!(c.sum(), a.sum() + b.sum());
        assert_eq!(c.fire, 5.0);
    }

    #[test]
    fn test_operations_do_not_mutate_inputs() {
        let a = Damage::from_pairs(&[(DamageType::Physical, 25.0)]);
        let b = Damage::from_pairs(&[(DamageType::Physical, 5.0)]);

        let _ = a.add(&b);
        let _ = a.subtract(&b);
        let doubled = a.multiply(2.0);

        assert_eq!(a.physical, 25.0);
        assert_eq!(b.physical, 5.0);
        assert_eq!(doubled.physical, 50.0);
    }
}
