use super::{Creature, CreatureId};
use crate::config::Config;
use crate::evolution::{MutationOutcome, MutationRule};
use rand::Rng;

impl Creature {
    /// Produces an unplaced, mutated child at the parent's coordinates.
    pub fn divide<R: Rng + ?Sized>(
        &self,
        child_id: CreatureId,
        rng: &mut R,
        config: &Config,
    ) -> (Creature, MutationOutcome) {
        let (genes, outcome) = MutationRule::new(self.genes(), &config.evolution).execute(rng);

        let mut child = Creature::new(child_id, genes, &config.creature);
        child.x = self.x;
        child.y = self.y;
        child.generation = self.generation + 1;

        (child, outcome)
    }
}
