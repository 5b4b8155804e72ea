use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::{Color, DevelopmentCard, PlayerKind};

pub const MAX_ROADS: usize = 15;
pub const MAX_SETTLEMENTS: usize = 5;
pub const MAX_CITIES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub number: u8,
    pub color: Color,
    pub kind: PlayerKind,
    pub name: String,
}

impl PlayerIdentity {
    pub fn new(number: u8, color: Color, kind: PlayerKind) -> Self {
        Self {
            number,
            color,
            kind,
            name: format!("{color}"),
        }
    }
}

/// One player's hand. Buildings live on the board, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub identity: PlayerIdentity,
    pub resources: ResourceBundle,
    pub dev_cards: Vec<DevelopmentCard>,
    /// Bought this turn; playable from the next turn on.
    pub fresh_dev_cards: Vec<DevelopmentCard>,
    pub played_soldiers: u8,
    pub dev_cards_played: u8,
    pub victory_points: u8,
    pub played_card_this_turn: bool,
}

impl PlayerState {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            resources: ResourceBundle::zero(),
            dev_cards: Vec::new(),
            fresh_dev_cards: Vec::new(),
            played_soldiers: 0,
            dev_cards_played: 0,
            victory_points: 0,
            played_card_this_turn: false,
        }
    }

    pub fn number(&self) -> u8 {
        self.identity.number
    }

    pub fn unlock_fresh_cards(&mut self) {
        self.dev_cards.append(&mut self.fresh_dev_cards);
        self.played_card_this_turn = false;
    }

    pub fn collect(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn pay(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    pub fn receive_dev_card(&mut self, card: DevelopmentCard) {
        self.fresh_dev_cards.push(card);
    }

    pub fn record_dev_card_play(&mut self, card: DevelopmentCard) {
        self.dev_cards_played += 1;
        if matches!(card, DevelopmentCard::Soldier) {
            self.played_soldiers += 1;
        }
        self.played_card_this_turn = true;
    }

    pub fn can_play_dev_card(&self, card: DevelopmentCard) -> bool {
        !self.played_card_this_turn
            && card != DevelopmentCard::VictoryPoint
            && self.dev_cards.contains(&card)
    }

    /// Removes one playable copy of `card`; false if none is held.
    pub fn consume_dev_card(&mut self, card: DevelopmentCard) -> bool {
        let held = self.dev_cards.iter().position(|c| *c == card);
        held.map(|at| self.dev_cards.remove(at)).is_some()
    }

    /// Held copies of `card`, playable or not.
    pub fn dev_card_count(&self, card: DevelopmentCard) -> usize {
        self.dev_cards
            .iter()
            .chain(&self.fresh_dev_cards)
            .filter(|c| **c == card)
            .count()
    }

    pub fn dev_card_total(&self) -> usize {
        self.dev_cards.len() + self.fresh_dev_cards.len()
    }

    pub fn resource_counts(&self) -> BTreeMap<crate::types::Resource, u8> {
        self.resources.count_map()
    }

    /// Zero-filled count map over every development card kind.
    pub fn dev_card_counts(&self) -> BTreeMap<DevelopmentCard, u8> {
        DevelopmentCard::ALL
            .iter()
            .map(|card| (*card, self.dev_card_count(*card) as u8))
            .collect()
    }

    pub fn recompute_victory_points(
        &mut self,
        settlements: usize,
        cities: usize,
        longest_road: bool,
        largest_army: bool,
    ) -> u8 {
        let mut points = settlements as u8 + 2 * cities as u8;
        points += self.dev_card_count(DevelopmentCard::VictoryPoint) as u8;
        if longest_road {
            points += 2;
        }
        if largest_army {
            points += 2;
        }
        self.victory_points = points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(PlayerIdentity::new(1, Color::Red, PlayerKind::Ai))
    }

    #[test]
    fn fresh_cards_mature_at_turn_end() {
        let mut p = player();
        p.receive_dev_card(DevelopmentCard::Monopoly);
        assert!(!p.can_play_dev_card(DevelopmentCard::Monopoly));
        p.unlock_fresh_cards();
        assert!(p.can_play_dev_card(DevelopmentCard::Monopoly));
    }

    #[test]
    fn one_card_per_turn() {
        let mut p = player();
        p.dev_cards = vec![DevelopmentCard::Soldier, DevelopmentCard::Soldier];
        assert!(p.consume_dev_card(DevelopmentCard::Soldier));
        p.record_dev_card_play(DevelopmentCard::Soldier);
        assert!(!p.can_play_dev_card(DevelopmentCard::Soldier));
        assert_eq!(p.played_soldiers, 1);
    }

    #[test]
    fn victory_points_sum_every_source() {
        let mut p = player();
        p.receive_dev_card(DevelopmentCard::VictoryPoint);
        assert_eq!(p.recompute_victory_points(2, 1, true, false), 7);
        assert_eq!(p.victory_points, 7);
        assert_eq!(p.dev_card_counts()[&DevelopmentCard::VictoryPoint], 1);
        assert_eq!(p.dev_card_counts()[&DevelopmentCard::Soldier], 0);
    }
}
