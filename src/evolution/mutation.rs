use crate::config::EvolutionConfig;
use crate::creature::genome::{
    feeding_genes, offensive_genes, Gene, GeneId, GeneSet, GENE_POWER_MAX, GENE_POWER_MIN,
    NON_ESSENTIAL_GENES,
};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::Serialize;

/// Gene changes applied to a child's genes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub mutated: Vec<GeneId>,
    pub gained: Vec<GeneId>,
    pub lost: Vec<GeneId>,
}

impl MutationOutcome {
    pub fn is_empty(&self) -> bool {
        self.mutated.is_empty() && self.gained.is_empty() && self.lost.is_empty()
    }
}

/// Mutates a private copy of a gene set. The parent's genes are never touched.
pub struct MutationRule<'a> {
    genes: GeneSet,
    config: &'a EvolutionConfig,
    outcome: MutationOutcome,
}

impl<'a> MutationRule<'a> {
    pub fn new(parent: &GeneSet, config: &'a EvolutionConfig) -> Self {
        Self {
            genes: parent.clone(),
            config,
            outcome: MutationOutcome::default(),
        }
    }

    pub fn execute<R: Rng + ?Sized>(mut self, rng: &mut R) -> (GeneSet, MutationOutcome) {
        if rng.gen::<f64>() < self.config.mutation_chance {
            if rng.gen_bool(0.5) {
                self.mutate_current_genes_up(rng);
            } else {
                self.mutate_current_genes_down(rng);
            }
        }

        if rng.gen::<f64>() < self.config.gain_gene_chance {
            self.add_new_gene(rng);
        }

        self.ensure_food_source(rng);
        self.ensure_carnivore_has_attack(rng);
        self.remove_offensive_genes_if_not_carnivore();

        (self.genes, self.outcome)
    }

    fn mutate_current_genes_up<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let candidate = self
            .genes
            .iter()
            .filter(|gene| gene.power < GENE_POWER_MAX)
            .map(|gene| gene.id)
            .choose(rng);

        if let Some(gene) = candidate.and_then(|id| self.genes.get_mut(id)) {
            gene.mutate_up();
            self.outcome.mutated.push(gene.id);
        }
    }

    fn mutate_current_genes_down<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let candidate = self
            .genes
            .iter()
            .filter(|gene| !gene.def().is_essential || gene.power > GENE_POWER_MIN)
            .map(|gene| gene.id)
            .choose(rng);

        let Some(id) = candidate else {
            return;
        };
        let dead = match self.genes.get_mut(id) {
            Some(gene) => {
                gene.mutate_down();
                gene.is_dead()
            }
            None => return,
        };

        if dead {
            self.genes.remove(id);
            self.outcome.lost.push(id);
        } else {
            self.outcome.mutated.push(id);
        }
    }

    pub fn has_exclusive_conflict(&self, candidate: GeneId) -> bool {
        self.genes.conflicts_with(candidate.def())
    }

    fn add_new_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let carnivore = self.genes.contains(GeneId::Carnivore);
        let acceptable: Vec<GeneId> = NON_ESSENTIAL_GENES
            .into_iter()
            .filter(|&id| !self.genes.contains(id))
            .filter(|&id| !self.has_exclusive_conflict(id))
            .filter(|&id| carnivore || !id.def().is_offensive())
            .collect();

        if let Some(&id) = acceptable.choose(rng) {
            self.gain(id);
        }
    }

    fn ensure_food_source<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.genes.has_feeding_gene() {
            return;
        }
        if let Some(id) = feeding_genes().choose(rng) {
            self.gain(id);
        }
    }

    fn ensure_carnivore_has_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.genes.contains(GeneId::Carnivore) || !self.genes.attack().is_zero() {
            return;
        }
        let weapon = offensive_genes()
            .filter(|&id| !self.has_exclusive_conflict(id))
            .choose(rng);
        if let Some(id) = weapon {
            self.gain(id);
        }
    }

    fn remove_offensive_genes_if_not_carnivore(&mut self) {
        if self.genes.contains(GeneId::Carnivore) || self.genes.attack().is_zero() {
            return;
        }
        for id in offensive_genes() {
            if self.genes.remove(id).is_some() {
                self.outcome.lost.push(id);
            }
        }
    }

    fn gain(&mut self, id: GeneId) {
        self.genes.insert(Gene::new(id));
        self.outcome.gained.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::genome::ESSENTIAL_GENES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn herbivore() -> GeneSet {
        GeneSet::from_ids(
            &[
                GeneId::Mass,
                GeneId::Speed,
                GeneId::Longevity,
                GeneId::Fertility,
                GeneId::Herbivore,
                GeneId::Legs,
            ],
            1,
        )
    }

    fn assert_invariants(genes: &GeneSet) {
        for id in ESSENTIAL_GENES {
            assert!(genes.power(id) >= GENE_POWER_MIN, "{id} missing");
        }
        assert!(genes.has_feeding_gene());
        if genes.contains(GeneId::Carnivore) {
            assert!(!genes.attack().is_zero());
        } else {
            assert!(genes.attack().is_zero());
        }
        for gene in genes.iter() {
            assert!(gene.power >= GENE_POWER_MIN && gene.power <= GENE_POWER_MAX);
            let clash = genes
                .iter()
                .filter(|other| other.id != gene.id)
                .any(|other| other.def().conflicts_with(gene.def()));
            assert!(!clash, "{} conflicts", gene.id);
        }
    }

    #[test]
    fn test_no_mutation_at_zero_chance() {
        let config = EvolutionConfig {
            mutation_chance: 0.0,
            gain_gene_chance: 0.0,
        };
        let parent = herbivore();
        let mut rng = StdRng::seed_from_u64(1);

        let (child, outcome) = MutationRule::new(&parent, &config).execute(&mut rng);

        assert_eq!(child, parent);
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_parent_is_untouched() {
        let config = EvolutionConfig {
            mutation_chance: 1.0,
            gain_gene_chance: 1.0,
        };
        let parent = herbivore();
        let snapshot = parent.clone();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            let _ = MutationRule::new(&parent, &config).execute(&mut rng);
        }
        assert_eq!(parent, snapshot);
    }

    #[test]
    fn test_invariants_hold_across_generations() {
        let config = EvolutionConfig {
            mutation_chance: 1.0,
            gain_gene_chance: 0.5,
        };

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut genes = herbivore();
            for _ in 0..100 {
                let (child, _) = MutationRule::new(&genes, &config).execute(&mut rng);
                assert_invariants(&child);
                genes = child;
            }
        }
    }

    #[test]
    fn test_lost_feeding_gene_is_replaced() {
        let config = EvolutionConfig::default();
        let genes = GeneSet::essential();
        let mut rng = StdRng::seed_from_u64(4);

        let (child, outcome) = MutationRule::new(&genes, &config).execute(&mut rng);

        assert!(child.has_feeding_gene());
        assert!(outcome.gained.iter().any(|id| id.def().is_feeding()));
    }

    #[test]
    fn test_carnivore_gets_a_weapon() {
        let config = EvolutionConfig {
            mutation_chance: 0.0,
            gain_gene_chance: 0.0,
        };
        let mut genes = GeneSet::essential();
        genes.insert(Gene::new(GeneId::Carnivore));
        let mut rng = StdRng::seed_from_u64(5);

        let (child, outcome) = MutationRule::new(&genes, &config).execute(&mut rng);

        assert!(!child.attack().is_zero());
        assert_eq!(outcome.gained.len(), 1);
        assert!(outcome.gained[0].def().is_offensive());
    }

    #[test]
    fn test_non_carnivore_loses_weapons() {
        let config = EvolutionConfig {
            mutation_chance: 0.0,
            gain_gene_chance: 0.0,
        };
        let mut genes = herbivore();
        genes.insert(Gene::new(GeneId::Fangs));
        genes.insert(Gene::new(GeneId::Sting));
        let mut rng = StdRng::seed_from_u64(6);

        let (child, outcome) = MutationRule::new(&genes, &config).execute(&mut rng);

        assert!(child.attack().is_zero());
        assert_eq!(outcome.lost, vec![GeneId::Fangs, GeneId::Sting]);
    }

    #[test]
    fn test_exclusive_conflict_detection() {
        let config = EvolutionConfig::default();
        let genes = herbivore();
        let rule = MutationRule::new(&genes, &config);

        assert!(rule.has_exclusive_conflict(GeneId::Hooves));
        assert!(!rule.has_exclusive_conflict(GeneId::Wings));
    }
}
