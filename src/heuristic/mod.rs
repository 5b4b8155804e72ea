//! Board evaluation: a stats snapshot fed through an ordered chain of
//! modifiers, each contributing named terms to a mod map.

pub mod modifiers;
pub mod stats;

pub use modifiers::{ModMap, Modifier};
pub use stats::{SiteStats, Stats};

use crate::game::action::PlayerId;
use crate::game::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heuristic {
    chain: Vec<Modifier>,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new([])
    }
}

impl Heuristic {
    /// The default weighting always runs first; `extra` follows in order.
    pub fn new(extra: impl IntoIterator<Item = Modifier>) -> Self {
        let mut chain = vec![Modifier::Default];
        chain.extend(extra.into_iter().filter(|m| *m != Modifier::Default));
        Self { chain }
    }

    pub fn chain(&self) -> &[Modifier] {
        &self.chain
    }

    pub fn breakdown(&self, state: &GameState, player: PlayerId) -> ModMap {
        let stats = Stats::collect(state, player);
        let mut mods = ModMap::new();
        for modifier in &self.chain {
            modifier.apply(&stats, &mut mods);
        }
        mods
    }

    pub fn evaluate(&self, state: &GameState, player: PlayerId) -> i64 {
        self.breakdown(state, player).values().sum::<f64>().round() as i64
    }
}
