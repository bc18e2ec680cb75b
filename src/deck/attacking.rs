//! The attacker's own deck, sampled without replacement for soul triggers.

use super::AttackingDeck;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackingDeckState {
    remaining: u32,
    soul_triggers: u32,
}

impl AttackingDeckState {
    pub fn new(deck: AttackingDeck) -> Self {
        Self {
            remaining: deck.size(),
            soul_triggers: deck.soul_triggers(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn soul_triggers(&self) -> u32 {
        self.soul_triggers
    }

    /// Reveal one card from the attacker deck. Returns true on a soul trigger.
    ///
    /// An exhausted attacker deck never triggers.
    pub fn resolve_soul_trigger<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.remaining == 0 {
            return false;
        }

        let hit = rng.gen_range(0..self.remaining) < self.soul_triggers;
        self.remaining -= 1;
        if hit {
            self.soul_triggers -= 1;
        }
        hit
    }
}
