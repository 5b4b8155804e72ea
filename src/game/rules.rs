use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{EdgeId, NodeId, TileId};
use crate::game::action::{CardPlay, Move, MoveCategory, PlayerId, RobberChoice, RollOutcome};
use crate::game::players::{MAX_CITIES, MAX_ROADS, MAX_SETTLEMENTS};
use crate::game::resources::{
    COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle, cost_of,
};
use crate::game::state::{Award, GameError, GameState, InvalidMove, Structure};
use crate::types::{BuildingKind, DevelopmentCard, Purchase, Resource};

pub const MIN_LONGEST_ROAD: u8 = 5;
pub const MIN_LARGEST_ARMY: u8 = 3;
pub const DISCARD_THRESHOLD: u32 = 7;
pub const FREE_ROADS_PER_CARD: u8 = 2;

/// How a road that passed validation is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadPayment {
    /// Second half of an initial-placement visit.
    Initial,
    /// Granted by a road-building card.
    Free,
    Paid,
}

impl GameState {
    fn check_player(&self, player: PlayerId) -> Result<(), InvalidMove> {
        if player < self.players.len() {
            Ok(())
        } else {
            Err(InvalidMove::UnknownPlayer(player))
        }
    }

    fn check_node(&self, node: NodeId) -> Result<(), InvalidMove> {
        if node < self.intersections().len() {
            Ok(())
        } else {
            Err(InvalidMove::NoSuchSite { kind: "intersection", id: node })
        }
    }

    fn node_key(&self, node: NodeId) -> String {
        self.topology().intersection(node).key.clone()
    }

    pub fn check_settlement(
        &self,
        player: PlayerId,
        node: NodeId,
        initial: bool,
    ) -> Result<(), InvalidMove> {
        self.check_player(player)?;
        self.check_node(node)?;
        if self.buildings[node].is_some() {
            return Err(InvalidMove::NodeOccupied(self.node_key(node)));
        }
        if self.check_for_nearby_occupancy(node) {
            return Err(InvalidMove::DistanceRule(self.node_key(node)));
        }
        if self.count_structure(player, BuildingKind::Settlement) >= MAX_SETTLEMENTS {
            return Err(InvalidMove::LimitReached(BuildingKind::Settlement));
        }
        if initial {
            return Ok(());
        }
        let touches_road = self
            .topology()
            .intersection(node)
            .edges
            .iter()
            .any(|edge| self.roads[*edge] == Some(player));
        if !touches_road {
            return Err(InvalidMove::NotConnected(self.node_key(node)));
        }
        if !self.players[player].resources.can_afford(&COST_SETTLEMENT) {
            return Err(InvalidMove::InsufficientResources(Purchase::Settlement));
        }
        Ok(())
    }

    pub fn check_city(&self, player: PlayerId, node: NodeId) -> Result<(), InvalidMove> {
        self.check_player(player)?;
        self.check_node(node)?;
        match self.buildings[node] {
            Some(Structure::Settlement { player: owner }) if owner == player => {}
            _ => return Err(InvalidMove::NotOwnSettlement(self.node_key(node))),
        }
        if self.count_structure(player, BuildingKind::City) >= MAX_CITIES {
            return Err(InvalidMove::LimitReached(BuildingKind::City));
        }
        if !self.players[player].resources.can_afford(&COST_CITY) {
            return Err(InvalidMove::InsufficientResources(Purchase::City));
        }
        Ok(())
    }

    pub fn check_road(&self, player: PlayerId, edge: EdgeId) -> Result<RoadPayment, InvalidMove> {
        self.check_player(player)?;
        let Some(site) = self.edges().get(edge) else {
            return Err(InvalidMove::NoSuchSite { kind: "edge", id: edge });
        };
        if self.roads[edge].is_some() {
            return Err(InvalidMove::EdgeOccupied(site.key.clone()));
        }
        if self.count_structure(player, BuildingKind::Road) >= MAX_ROADS {
            return Err(InvalidMove::LimitReached(BuildingKind::Road));
        }
        if let Some((owner, anchor)) = self.initial_anchor {
            if owner == player {
                if !site.touches(anchor) {
                    return Err(InvalidMove::NotAnchored(self.node_key(anchor)));
                }
                return Ok(RoadPayment::Initial);
            }
        }
        let (a, b) = site.nodes;
        if !self.node_reaches_network(player, a) && !self.node_reaches_network(player, b) {
            return Err(InvalidMove::NotConnected(site.key.clone()));
        }
        if self.free_roads(player) > 0 {
            return Ok(RoadPayment::Free);
        }
        if !self.players[player].resources.can_afford(&COST_ROAD) {
            return Err(InvalidMove::InsufficientResources(Purchase::Road));
        }
        Ok(RoadPayment::Paid)
    }

    /// Resolves the victim of a robber move, or explains why it is illegal.
    pub fn check_robber(
        &self,
        player: PlayerId,
        choice: RobberChoice,
    ) -> Result<Option<PlayerId>, InvalidMove> {
        self.check_player(player)?;
        if choice.tile >= self.tiles().len() {
            return Err(InvalidMove::NoSuchSite { kind: "tile", id: choice.tile });
        }
        if !self.pending_discards.is_empty() {
            return Err(InvalidMove::DiscardsPending);
        }
        if choice.tile == self.robber {
            return Err(InvalidMove::RobberNotMoved);
        }
        let victims = self.robber_victims(player, choice.tile);
        match choice.victim {
            Some(victim) if victims.contains(&victim) => Ok(Some(victim)),
            Some(victim) => Err(InvalidMove::InvalidVictim(victim)),
            None => match victims.as_slice() {
                [] => Ok(None),
                [only] => Ok(Some(*only)),
                _ => Err(InvalidMove::VictimRequired(victims)),
            },
        }
    }

    /// Opponents with a building on `tile`, in seat order.
    pub fn robber_victims(&self, player: PlayerId, tile: TileId) -> Vec<PlayerId> {
        let mut victims: Vec<PlayerId> = self
            .topology()
            .tile(tile)
            .nodes
            .iter()
            .filter_map(|node| self.buildings[*node])
            .map(|s| s.owner())
            .filter(|owner| *owner != player)
            .collect();
        victims.sort_unstable();
        victims.dedup();
        victims
    }

    pub fn robber_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles().len()).filter(move |tile| *tile != self.robber)
    }

    pub fn settlement_sites(&self, player: PlayerId, initial: bool) -> Vec<NodeId> {
        (0..self.intersections().len())
            .filter(|node| self.check_settlement(player, *node, initial).is_ok())
            .collect()
    }

    pub fn city_sites(&self, player: PlayerId) -> Vec<NodeId> {
        self.settlements_of(player)
            .filter(|node| self.check_city(player, *node).is_ok())
            .collect()
    }

    pub fn road_sites(&self, player: PlayerId) -> Vec<EdgeId> {
        (0..self.edges().len())
            .filter(|edge| self.check_road(player, *edge).is_ok())
            .collect()
    }

    /// Distinct development cards the player may play right now.
    pub fn playable_cards(&self, player: PlayerId) -> Vec<DevelopmentCard> {
        let Some(state) = self.players.get(player) else {
            return Vec::new();
        };
        DevelopmentCard::ALL
            .into_iter()
            .filter(|card| state.can_play_dev_card(*card))
            .collect()
    }

    /// Pairs `(give, get)` the player can currently trade with the bank.
    pub fn bank_trades(&self, player: PlayerId) -> Vec<(Resource, Resource)> {
        let Some(state) = self.players.get(player) else {
            return Vec::new();
        };
        let mut trades = Vec::new();
        for give in Resource::ALL {
            if state.resources.get(give) < self.trade_ratio(player, give) {
                continue;
            }
            for get in Resource::ALL {
                if get != give && self.bank.available(get) > 0 {
                    trades.push((give, get));
                }
            }
        }
        trades
    }

    /// The kinds of move open to `player`. Ending the turn is always allowed.
    pub fn legal_moves(&self, player: PlayerId) -> BTreeSet<MoveCategory> {
        let mut moves = BTreeSet::from([MoveCategory::EndTurn]);
        let Some(state) = self.players.get(player) else {
            return moves;
        };
        let hand = &state.resources;
        if hand.can_afford(&COST_SETTLEMENT) && !self.settlement_sites(player, false).is_empty() {
            moves.insert(MoveCategory::BuildSettlement);
        }
        if !self.city_sites(player).is_empty() {
            moves.insert(MoveCategory::BuildCity);
        }
        if !self.road_sites(player).is_empty() {
            moves.insert(MoveCategory::BuildRoad);
        }
        if hand.can_afford(&COST_DEVELOPMENT) && self.bank.development_deck_len() > 0 {
            moves.insert(MoveCategory::BuyDevelopmentCard);
        }
        if !self.playable_cards(player).is_empty() {
            moves.insert(MoveCategory::PlayDevelopmentCard);
        }
        if !self.bank_trades(player).is_empty() {
            moves.insert(MoveCategory::TradeWithBank);
        }
        moves
    }

    /// Applies one turn move for `player`. Validation happens before any
    /// mutation, so a rejected move leaves the state untouched.
    pub fn apply_move(&mut self, player: PlayerId, mv: Move) -> Result<(), GameError> {
        match mv {
            Move::EndTurn => {
                self.check_player(player)?;
                self.end_turn(player);
                Ok(())
            }
            Move::BuildSettlement(node) => self.place_settlement(player, node),
            Move::BuildCity(node) => self.place_city(player, node),
            Move::BuildRoad(edge) => self.place_road(player, edge).map(|_| ()),
            Move::BuyDevelopmentCard => self.buy_development_card(player).map(|_| ()),
            Move::PlayDevelopmentCard(play) => self.play_development_card(player, play),
            Move::TradeWithBank { give, get } => self.trade_with_bank(player, give, get),
        }
    }

    fn pay(&mut self, player: PlayerId, purchase: Purchase) -> Result<(), InvalidMove> {
        let cost = cost_of(purchase);
        self.players[player]
            .pay(&cost)
            .map_err(|_| InvalidMove::InsufficientResources(purchase))?;
        self.bank.receive(&cost);
        Ok(())
    }

    pub fn place_settlement(&mut self, player: PlayerId, node: NodeId) -> Result<(), GameError> {
        self.check_settlement(player, node, false)?;
        self.pay(player, Purchase::Settlement)?;
        self.buildings[node] = Some(Structure::Settlement { player });
        self.log_action(
            player,
            format_args!("builds a settlement at {}", self.node_key(node)),
        );
        self.recompute_awards();
        Ok(())
    }

    /// Free settlement during the opening; the next road this player places
    /// must touch it.
    pub fn place_initial_settlement(
        &mut self,
        player: PlayerId,
        node: NodeId,
    ) -> Result<(), GameError> {
        self.check_settlement(player, node, true)?;
        self.buildings[node] = Some(Structure::Settlement { player });
        self.initial_anchor = Some((player, node));
        self.log_action(
            player,
            format_args!("places a settlement at {}", self.node_key(node)),
        );
        self.recompute_awards();
        Ok(())
    }

    /// One card per resource tile around `node`, as far as the bank allows.
    pub fn grant_initial_resources(
        &mut self,
        player: PlayerId,
        node: NodeId,
    ) -> Result<ResourceBundle, GameError> {
        self.check_player(player)?;
        self.check_node(node)?;
        let topology = self.shared_topology();
        let mut bundle = ResourceBundle::zero();
        for tile in &topology.intersection(node).tiles {
            if let Some(resource) = topology.tile(*tile).resource {
                if self.bank.available(resource) > 0 {
                    self.give_card(player, resource)?;
                    bundle.add(resource, 1);
                }
            }
        }
        self.log_action(player, format_args!("receives {bundle}"));
        Ok(bundle)
    }

    pub fn place_city(&mut self, player: PlayerId, node: NodeId) -> Result<(), GameError> {
        self.check_city(player, node)?;
        self.pay(player, Purchase::City)?;
        self.buildings[node] = Some(Structure::City { player });
        self.log_action(
            player,
            format_args!("upgrades {} to a city", self.node_key(node)),
        );
        self.recompute_awards();
        Ok(())
    }

    /// Places a road, charging for it unless it is an opening road or a
    /// road-building placement.
    pub fn place_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<RoadPayment, GameError> {
        let payment = self.check_road(player, edge)?;
        match payment {
            RoadPayment::Initial => self.initial_anchor = None,
            RoadPayment::Free => {
                self.free_roads = match self.free_roads {
                    Some((owner, left)) if left > 1 => Some((owner, left - 1)),
                    _ => None,
                };
            }
            RoadPayment::Paid => self.pay(player, Purchase::Road)?,
        }
        self.roads[edge] = Some(player);
        self.log_action(
            player,
            format_args!("builds a road on {}", self.topology().edge(edge).key),
        );
        self.recompute_awards();
        Ok(payment)
    }

    /// Drops any unused road-building placements.
    pub fn forfeit_free_roads(&mut self, player: PlayerId) -> Result<u8, GameError> {
        let left = self.free_roads(player);
        if left == 0 {
            return Err(InvalidMove::NoFreeRoads.into());
        }
        self.free_roads = None;
        self.log_action(player, format_args!("forfeits {left} free roads"));
        Ok(left)
    }

    pub fn buy_development_card(&mut self, player: PlayerId) -> Result<DevelopmentCard, GameError> {
        self.check_player(player)?;
        if self.bank.development_deck_len() == 0 {
            return Err(InvalidMove::DeckEmpty.into());
        }
        if !self.players[player].resources.can_afford(&COST_DEVELOPMENT) {
            return Err(InvalidMove::InsufficientResources(Purchase::DevelopmentCard).into());
        }
        self.pay(player, Purchase::DevelopmentCard)?;
        let card = self
            .bank
            .draw_development_card()
            .ok_or(InvalidMove::DeckEmpty)?;
        self.players[player].receive_dev_card(card);
        self.log_action(player, format_args!("buys a development card"));
        self.refresh_victory_points();
        Ok(card)
    }

    /// Deals a specific card from the deck, as when the operator hands out a
    /// physical card at the table. It becomes playable from the next turn.
    pub fn give_development_card(
        &mut self,
        player: PlayerId,
        card: DevelopmentCard,
    ) -> Result<(), GameError> {
        self.check_player(player)?;
        let card = self
            .bank
            .take_development_card(card)
            .ok_or(InvalidMove::CardNotInDeck(card))?;
        self.players[player].receive_dev_card(card);
        self.refresh_victory_points();
        Ok(())
    }

    pub fn play_development_card(
        &mut self,
        player: PlayerId,
        play: CardPlay,
    ) -> Result<(), GameError> {
        self.check_player(player)?;
        let card = play.card();
        if !self.players[player].can_play_dev_card(card) {
            return Err(InvalidMove::CardNotPlayable(card).into());
        }
        match play {
            CardPlay::Soldier(choice) => {
                let victim = self.check_robber(player, choice)?;
                self.spend_card(player, card);
                self.log_action(player, format_args!("plays a soldier"));
                self.relocate_robber(player, choice.tile, victim);
            }
            CardPlay::Monopoly(resource) => {
                self.spend_card(player, card);
                let mut taken = 0u8;
                for (seat, other) in self.players.iter_mut().enumerate() {
                    if seat != player {
                        taken += other.resources.take_all(resource);
                    }
                }
                self.players[player].resources.add(resource, taken);
                self.bank.return_development_card(card);
                self.log_action(
                    player,
                    format_args!("plays monopoly on {resource} and collects {taken}"),
                );
            }
            CardPlay::YearOfPlenty(first, second) => {
                self.spend_card(player, card);
                let mut drawn = ResourceBundle::zero();
                for resource in [first, second] {
                    let single = ResourceBundle::single(resource, 1);
                    if self.bank.dispense(&single).is_ok() {
                        drawn.add(resource, 1);
                    }
                }
                self.players[player].collect(&drawn);
                self.bank.return_development_card(card);
                self.log_action(
                    player,
                    format_args!("plays year of plenty and draws {drawn}"),
                );
            }
            CardPlay::RoadBuilding => {
                self.spend_card(player, card);
                self.free_roads = Some((player, FREE_ROADS_PER_CARD));
                self.bank.return_development_card(card);
                self.log_action(player, format_args!("plays road building"));
            }
        }
        self.recompute_awards();
        Ok(())
    }

    fn spend_card(&mut self, player: PlayerId, card: DevelopmentCard) {
        let hand = &mut self.players[player];
        if hand.consume_dev_card(card) {
            hand.record_dev_card_play(card);
        }
    }

    pub fn trade_with_bank(
        &mut self,
        player: PlayerId,
        give: Resource,
        get: Resource,
    ) -> Result<(), GameError> {
        self.check_player(player)?;
        if give == get {
            return Err(InvalidMove::SameResource { give, get }.into());
        }
        let ratio = self.trade_ratio(player, give);
        let held = self.players[player].resources.get(give);
        if held < ratio {
            return Err(InvalidMove::TradeRatio { give, ratio, held }.into());
        }
        if self.bank.available(get) == 0 {
            return Err(InvalidMove::BankEmpty(get).into());
        }
        let payment = ResourceBundle::single(give, ratio);
        let received = ResourceBundle::single(get, 1);
        self.players[player]
            .pay(&payment)
            .map_err(|_| InvalidMove::TradeRatio { give, ratio, held })?;
        self.bank.receive(&payment);
        self.bank
            .dispense(&received)
            .map_err(|_| InvalidMove::BankEmpty(get))?;
        self.players[player].collect(&received);
        self.log_action(
            player,
            format_args!("trades {ratio} {give} for 1 {get} with the bank"),
        );
        Ok(())
    }

    /// Moves one card from the bank into the player's hand.
    pub fn give_card(&mut self, player: PlayerId, resource: Resource) -> Result<(), GameError> {
        self.check_player(player)?;
        let single = ResourceBundle::single(resource, 1);
        self.bank
            .dispense(&single)
            .map_err(|_| InvalidMove::BankEmpty(resource))?;
        self.players[player].collect(&single);
        Ok(())
    }

    /// Moves one card from the player's hand back to the bank.
    pub fn return_card(&mut self, player: PlayerId, resource: Resource) -> Result<(), GameError> {
        self.check_player(player)?;
        let single = ResourceBundle::single(resource, 1);
        self.players[player]
            .pay(&single)
            .map_err(|_| InvalidMove::NotHeld(resource))?;
        self.bank.receive(&single);
        Ok(())
    }

    pub fn roll_dice(&mut self) -> u8 {
        self.rng.gen_range(1..=6) + self.rng.gen_range(1..=6)
    }

    /// Resolves a dice total. A seven records the discards owed (hands over
    /// seven give up half, rounded down); the robber move follows separately.
    /// Any other total pays out every unblocked tile showing that number.
    pub fn process_roll(&mut self, roll: u8, current: PlayerId) -> Result<RollOutcome, GameError> {
        self.check_player(current)?;
        if !(2..=12).contains(&roll) {
            return Err(InvalidMove::InvalidRoll(roll).into());
        }
        self.log_action(current, format_args!("rolls {roll}"));
        if roll == 7 {
            self.pending_discards = self
                .players
                .iter()
                .enumerate()
                .filter_map(|(seat, state)| {
                    let held = state.resources.total();
                    (held > DISCARD_THRESHOLD).then_some((seat, (held / 2) as u8))
                })
                .collect();
            return Ok(RollOutcome::Seven {
                discards: self.pending_discards.clone(),
            });
        }

        let topology = self.shared_topology();
        let mut owed = vec![ResourceBundle::zero(); self.players.len()];
        for tile in topology.tiles() {
            if tile.number != roll || tile.id == self.robber {
                continue;
            }
            let Some(resource) = tile.resource else {
                continue;
            };
            for node in &tile.nodes {
                if let Some(structure) = self.buildings[*node] {
                    owed[structure.owner()].add(resource, structure.yield_multiplier());
                }
            }
        }

        let mut shortages = Vec::new();
        for resource in Resource::ALL {
            let requested: u32 = owed.iter().map(|b| b.get(resource) as u32).sum();
            let available = self.bank.available(resource);
            if requested <= available as u32 {
                continue;
            }
            shortages.push(resource);
            if !self.is_simulation() {
                log::warn!(
                    "{}",
                    GameError::BankExhausted {
                        resource,
                        requested,
                        available,
                    }
                );
            }
            let claimants: Vec<PlayerId> = (0..owed.len())
                .filter(|seat| owed[*seat].get(resource) > 0)
                .collect();
            for seat in &claimants {
                owed[*seat].take_all(resource);
            }
            if let [only] = claimants.as_slice() {
                owed[*only].add(resource, available);
            }
        }

        let mut gains = Vec::new();
        for (seat, bundle) in owed.into_iter().enumerate() {
            if bundle.is_empty() {
                continue;
            }
            for (resource, amount) in bundle.iter().filter(|(_, amount)| *amount > 0) {
                self.bank
                    .dispense(&ResourceBundle::single(resource, amount))
                    .map_err(|_| InvalidMove::BankEmpty(resource))?;
            }
            self.players[seat].collect(&bundle);
            self.log_action(seat, format_args!("collects {bundle}"));
            gains.push((seat, bundle));
        }
        Ok(RollOutcome::Produced { gains, shortages })
    }

    /// Cards the player still has to give up after a seven.
    pub fn discard_owed(&self, player: PlayerId) -> u8 {
        self.pending_discards
            .iter()
            .find(|(seat, _)| *seat == player)
            .map_or(0, |(_, count)| *count)
    }

    pub fn discard(&mut self, player: PlayerId, cards: ResourceBundle) -> Result<(), GameError> {
        self.check_player(player)?;
        let pos = self
            .pending_discards
            .iter()
            .position(|(seat, _)| *seat == player)
            .ok_or(InvalidMove::NoDiscardOwed(player))?;
        let expected = self.pending_discards[pos].1;
        if cards.total() != expected as u32 {
            return Err(InvalidMove::WrongDiscardSize {
                expected,
                actual: cards.total(),
            }
            .into());
        }
        self.players[player]
            .pay(&cards)
            .map_err(|_| InvalidMove::DiscardNotHeld)?;
        self.bank.receive(&cards);
        self.pending_discards.remove(pos);
        self.log_action(player, format_args!("discards {cards}"));
        Ok(())
    }

    /// Robber protocol after a seven. Returns the stolen resource, if any.
    pub fn move_robber(
        &mut self,
        player: PlayerId,
        choice: RobberChoice,
    ) -> Result<Option<Resource>, GameError> {
        let victim = self.check_robber(player, choice)?;
        Ok(self.relocate_robber(player, choice.tile, victim))
    }

    fn relocate_robber(
        &mut self,
        player: PlayerId,
        tile: TileId,
        victim: Option<PlayerId>,
    ) -> Option<Resource> {
        self.robber = tile;
        self.log_action(
            player,
            format_args!("moves the robber to {}", self.topology().tile(tile).letter),
        );
        let victim = victim?;
        let cards = self.players[victim].resources.cards();
        let stolen = *cards.choose(&mut self.rng)?;
        self.players[victim].resources.subtract(stolen, 1).ok()?;
        self.players[player].resources.add(stolen, 1);
        self.log_action(
            player,
            format_args!("steals a card from {}", self.players[victim].identity.name),
        );
        Some(stolen)
    }

    pub fn end_turn(&mut self, player: PlayerId) {
        if let Some(state) = self.players.get_mut(player) {
            state.unlock_fresh_cards();
        }
        self.free_roads = None;
        self.log_action(player, format_args!("ends the turn"));
        self.turn += 1;
    }

    /// Re-evaluates both special awards and every player's victory points.
    pub fn recompute_awards(&mut self) {
        self.recompute_longest_road();
        self.recompute_largest_army();
        self.refresh_victory_points();
    }

    fn recompute_longest_road(&mut self) {
        let lengths: Vec<u8> = (0..self.players.len())
            .map(|seat| self.road_length(seat).min(u8::MAX as usize) as u8)
            .collect();
        let mut award = self.longest_road;
        if let Some(holder) = award.holder {
            award.size = lengths[holder];
            if award.size < MIN_LONGEST_ROAD {
                award = Award::default();
            }
        }
        let threshold = match award.holder {
            Some(_) => award.size,
            None => MIN_LONGEST_ROAD - 1,
        };
        let challengers = || {
            lengths
                .iter()
                .enumerate()
                .filter(|(seat, _)| Some(*seat) != award.holder)
        };
        let best = challengers().map(|(_, len)| *len).max().unwrap_or(0);
        if best > threshold {
            let leaders: Vec<PlayerId> = challengers()
                .filter(|(_, len)| **len == best)
                .map(|(seat, _)| seat)
                .collect();
            award = match leaders.as_slice() {
                [only] => Award {
                    holder: Some(*only),
                    size: best,
                },
                _ => Award::default(),
            };
        }
        if award.holder != self.longest_road.holder {
            if let Some(holder) = award.holder {
                self.log_action(
                    holder,
                    format_args!("takes the longest road ({})", award.size),
                );
            }
        }
        self.longest_road = award;
    }

    fn recompute_largest_army(&mut self) {
        let mut award = self.largest_army;
        if let Some(holder) = award.holder {
            award.size = self.players[holder].played_soldiers;
        }
        for (seat, state) in self.players.iter().enumerate() {
            let soldiers = state.played_soldiers;
            if Some(seat) != award.holder && soldiers >= MIN_LARGEST_ARMY && soldiers > award.size {
                award = Award {
                    holder: Some(seat),
                    size: soldiers,
                };
            }
        }
        if award.holder != self.largest_army.holder {
            if let Some(holder) = award.holder {
                self.log_action(
                    holder,
                    format_args!("takes the largest army ({})", award.size),
                );
            }
        }
        self.largest_army = award;
    }

    pub fn refresh_victory_points(&mut self) {
        for seat in 0..self.players.len() {
            let settlements = self.count_structure(seat, BuildingKind::Settlement);
            let cities = self.count_structure(seat, BuildingKind::City);
            let longest = self.longest_road.holder == Some(seat);
            let largest = self.largest_army.holder == Some(seat);
            self.players[seat].recompute_victory_points(settlements, cities, longest, largest);
        }
    }
}
