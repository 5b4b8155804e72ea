use rand::seq::SliceRandom;

use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::{DevelopmentCard, Resource};

pub const RESOURCES_PER_KIND: u8 = 19;
pub const DEVELOPMENT_DECK_SIZE: usize = 25;

/// Card counts of a fresh development deck.
const DECK_MIX: [(DevelopmentCard, usize); 5] = [
    (DevelopmentCard::Soldier, 14),
    (DevelopmentCard::VictoryPoint, 5),
    (DevelopmentCard::RoadBuilding, 2),
    (DevelopmentCard::YearOfPlenty, 2),
    (DevelopmentCard::Monopoly, 2),
];

/// The resource deck and the development-card deck. The top of the
/// development deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Bank {
    resources: ResourceBundle,
    dev_cards: Vec<DevelopmentCard>,
}

impl Bank {
    /// Full resource piles and a shuffled development deck.
    pub fn standard(rng: &mut impl rand::Rng) -> Self {
        let mut dev_cards: Vec<DevelopmentCard> = DECK_MIX
            .iter()
            .flat_map(|&(card, copies)| std::iter::repeat(card).take(copies))
            .collect();
        debug_assert_eq!(dev_cards.len(), DEVELOPMENT_DECK_SIZE);
        dev_cards.shuffle(rng);
        Bank {
            resources: ResourceBundle::from_counts([RESOURCES_PER_KIND; 5]),
            dev_cards,
        }
    }

    pub fn resources(&self) -> &ResourceBundle {
        &self.resources
    }

    pub fn available(&self, resource: Resource) -> u8 {
        self.resources.get(resource)
    }

    pub fn receive(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    /// Pays out `bundle` in full or not at all.
    pub fn dispense(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    pub fn draw_development_card(&mut self) -> Option<DevelopmentCard> {
        self.dev_cards.pop()
    }

    /// Pulls the topmost copy of `card` out of the deck.
    pub fn take_development_card(&mut self, card: DevelopmentCard) -> Option<DevelopmentCard> {
        self.dev_cards
            .iter()
            .rposition(|c| *c == card)
            .map(|at| self.dev_cards.remove(at))
    }

    /// Puts a played card back underneath the deck.
    pub fn return_development_card(&mut self, card: DevelopmentCard) {
        self.dev_cards.insert(0, card);
    }

    pub fn shuffle_development_deck(&mut self, rng: &mut impl rand::Rng) {
        self.dev_cards.shuffle(rng);
    }

    pub fn development_deck(&self) -> &[DevelopmentCard] {
        &self.dev_cards
    }

    pub fn development_deck_len(&self) -> usize {
        self.dev_cards.len()
    }
}
