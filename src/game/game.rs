use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS, SetupError};
use crate::game::action::{CardPlay, Move, PlayerId, RollOutcome};
use crate::game::players::PlayerIdentity;
use crate::game::state::{GameError, GameState};
use crate::players::{Agent, RoadRequest, TurnClock};

/// Source of dice totals.
pub trait Dice {
    fn roll(&mut self, state: &mut GameState) -> u8;
}

/// Two dice drawn from the engine's own seeded RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineDice;

impl Dice for EngineDice {
    fn roll(&mut self, state: &mut GameState) -> u8 {
        state.roll_dice()
    }
}

/// Plays back a fixed sequence of totals, then falls back to the engine RNG.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, state: &mut GameState) -> u8 {
        self.rolls.pop_front().unwrap_or_else(|| state.roll_dice())
    }
}

/// Hook for displaying the table between turns.
pub trait Observer {
    fn turn_started(&mut self, state: &GameState, player: PlayerId);

    fn game_finished(&mut self, _state: &GameState, _summary: &GameSummary) {}
}

pub struct Seat {
    pub identity: PlayerIdentity,
    pub agent: Box<dyn Agent>,
}

impl Seat {
    pub fn new(identity: PlayerIdentity, agent: Box<dyn Agent>) -> Self {
        Self { identity, agent }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub id: Uuid,
    pub winner: Option<PlayerId>,
    pub rounds: u32,
    /// The round limit ran out before anyone reached the target.
    pub capped: bool,
    /// Name and victory points per seat, in turn order.
    pub standings: Vec<(String, u8)>,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "game {} after {} rounds", self.id, self.rounds)?;
        for (seat, (name, points)) in self.standings.iter().enumerate() {
            let marker = if self.winner == Some(seat) { "*" } else { " " };
            writeln!(f, "{marker} {name:<8} {points:>2} VP")?;
        }
        if self.capped {
            write!(f, "round limit reached")?;
        }
        Ok(())
    }
}

pub struct Game {
    pub id: Uuid,
    pub config: GameConfig,
    pub state: GameState,
    agents: Vec<Box<dyn Agent>>,
    dice: Box<dyn Dice>,
    observer: Option<Box<dyn Observer>>,
}

impl Game {
    /// Validates the table, shuffles the seating and renumbers players in
    /// their new turn order.
    pub fn new(seats: Vec<Seat>, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        validate_seats(&seats)?;

        let mut seats = seats;
        let mut rng = StdRng::seed_from_u64(config.seed);
        seats.shuffle(&mut rng);

        let mut identities = Vec::with_capacity(seats.len());
        let mut agents = Vec::with_capacity(seats.len());
        for (order, seat) in seats.into_iter().enumerate() {
            let mut identity = seat.identity;
            identity.number = order as u8 + 1;
            identities.push(identity);
            agents.push(seat.agent);
        }

        let state = GameState::new(identities, &config);
        let id = Uuid::new_v4();
        log::info!("game {id} seated {} players", agents.len());
        Ok(Self {
            id,
            config,
            state,
            agents,
            dice: Box::new(EngineDice),
            observer: None,
        })
    }

    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn play(&mut self) -> Result<GameSummary, GameError> {
        self.initial_placement()?;
        loop {
            self.state.round += 1;
            if self.state.round > self.config.round_limit {
                log::warn!("round limit {} reached", self.config.round_limit);
                return Ok(self.finish(self.state.leader(), true));
            }
            for player in 0..self.agents.len() {
                self.play_turn(player)?;
                if let Some(winner) = self.state.winner() {
                    return Ok(self.finish(Some(winner), false));
                }
            }
        }
    }

    /// Snake-order opening: every seat places a settlement and a touching
    /// road, then again in reverse order, collecting resources the second
    /// time round.
    pub fn initial_placement(&mut self) -> Result<(), GameError> {
        let seats = self.agents.len();
        let order: Vec<PlayerId> = (0..seats).chain((0..seats).rev()).collect();
        for (visit, player) in order.into_iter().enumerate() {
            let agent = &mut self.agents[player];
            let node = agent
                .initial_placement(&self.state, player)
                .ok_or_else(|| agent_failure(player, "no opening settlement chosen"))?;
            self.state
                .place_initial_settlement(player, node)
                .map_err(|e| agent_failure(player, e))?;
            let edge = agent
                .choose_road_location(&self.state, player, RoadRequest::Initial(node))
                .ok_or_else(|| agent_failure(player, "no opening road chosen"))?;
            self.state
                .place_road(player, edge)
                .map_err(|e| agent_failure(player, e))?;
            if visit >= seats {
                self.state.grant_initial_resources(player, node)?;
            }
        }
        Ok(())
    }

    pub fn play_turn(&mut self, player: PlayerId) -> Result<(), GameError> {
        if let Some(observer) = self.observer.as_mut() {
            observer.turn_started(&self.state, player);
        }
        let roll = self.dice.roll(&mut self.state);
        let outcome = self.state.process_roll(roll, player)?;
        if let RollOutcome::Seven { discards } = outcome {
            for (victim, count) in discards {
                let cards = self.agents[victim].robber_discard(&self.state, victim, count);
                self.state
                    .discard(victim, cards)
                    .map_err(|e| agent_failure(victim, e))?;
            }
            let choice = self.agents[player].robber(&self.state, player);
            self.state
                .move_robber(player, choice)
                .map_err(|e| agent_failure(player, e))?;
        }

        let clock = TurnClock::start(self.config.time_limit());
        run_turn(&mut self.state, self.agents[player].as_mut(), player, &clock)?;
        self.state.recompute_awards();
        Ok(())
    }

    fn finish(&mut self, winner: Option<PlayerId>, capped: bool) -> GameSummary {
        let summary = GameSummary {
            id: self.id,
            winner,
            rounds: self.state.round.min(self.config.round_limit),
            capped,
            standings: self
                .state
                .players()
                .iter()
                .map(|p| (p.identity.name.clone(), p.victory_points))
                .collect(),
        };
        if let Some(winner) = winner {
            log::info!(
                "{} wins with {} VP",
                self.state.player(winner).identity.name,
                self.state.victory_points(winner)
            );
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.game_finished(&self.state, &summary);
        }
        summary
    }
}

/// Drives one player's turn actions until the agent ends the turn or the
/// player reaches the target score. Returns the moves applied.
pub fn run_turn(
    state: &mut GameState,
    agent: &mut dyn Agent,
    player: PlayerId,
    clock: &TurnClock,
) -> Result<Vec<Move>, GameError> {
    let mut applied = Vec::new();
    loop {
        let mv = agent.turn_action(state, player, clock);
        state
            .apply_move(player, mv)
            .map_err(|e| agent_failure(player, e))?;
        applied.push(mv);
        match mv {
            Move::EndTurn => return Ok(applied),
            Move::PlayDevelopmentCard(CardPlay::RoadBuilding) => {
                place_free_roads(state, agent, player)?;
            }
            _ => {}
        }
        if state.winner() == Some(player) {
            state.apply_move(player, Move::EndTurn)?;
            applied.push(Move::EndTurn);
            return Ok(applied);
        }
    }
}

fn place_free_roads(
    state: &mut GameState,
    agent: &mut dyn Agent,
    player: PlayerId,
) -> Result<(), GameError> {
    while state.free_roads(player) > 0 {
        if state.road_sites(player).is_empty() {
            state.forfeit_free_roads(player)?;
            break;
        }
        match agent.choose_road_location(state, player, RoadRequest::Free) {
            Some(edge) => {
                state
                    .place_road(player, edge)
                    .map_err(|e| agent_failure(player, e))?;
            }
            None => {
                state.forfeit_free_roads(player)?;
            }
        }
    }
    Ok(())
}

fn validate_seats(seats: &[Seat]) -> Result<(), SetupError> {
    if seats.len() < MIN_PLAYERS {
        return Err(SetupError::TooFewPlayers(seats.len()));
    }
    if seats.len() > MAX_PLAYERS {
        return Err(SetupError::TooManyPlayers(seats.len()));
    }
    let mut numbers = HashSet::new();
    let mut colors = HashSet::new();
    for seat in seats {
        if !numbers.insert(seat.identity.number) {
            return Err(SetupError::DuplicateNumber(seat.identity.number));
        }
        if !colors.insert(seat.identity.color) {
            return Err(SetupError::DuplicateColor(seat.identity.color));
        }
    }
    Ok(())
}

fn agent_failure(player: PlayerId, reason: impl fmt::Display) -> GameError {
    GameError::AgentFailure {
        player,
        reason: reason.to_string(),
    }
}
