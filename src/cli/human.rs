use dialoguer::{Input, Select};

use crate::board::{EdgeId, NodeId};
use crate::cli::display::{describe_move, describe_robber, render_text};
use crate::game::action::{Move, MoveCategory, PlayerId, RobberChoice};
use crate::game::game::Dice;
use crate::game::resources::ResourceBundle;
use crate::game::state::GameState;
use crate::players::candidates::{moves_in, robber_choices};
use crate::players::{Agent, RoadRequest, TurnClock};
use crate::types::Resource;

const BACK: &str = "<- back";
const SHOW_TABLE: &str = "show table";

fn category_label(category: MoveCategory) -> &'static str {
    match category {
        MoveCategory::EndTurn => "end turn",
        MoveCategory::BuildSettlement => "build a settlement",
        MoveCategory::BuildCity => "build a city",
        MoveCategory::BuildRoad => "build a road",
        MoveCategory::BuyDevelopmentCard => "buy a development card",
        MoveCategory::PlayDevelopmentCard => "play a development card",
        MoveCategory::TradeWithBank => "trade with the bank",
    }
}

fn select(prompt: &str, items: &[String]) -> Option<usize> {
    match Select::new()
        .with_prompt(prompt)
        .report(false)
        .items(items)
        .default(0)
        .interact()
    {
        Ok(index) => Some(index),
        Err(e) => {
            log::error!("terminal prompt failed: {e}");
            None
        }
    }
}

/// Asks the operator at the terminal for every decision. Every list offered
/// holds only legal choices, and sub-menus can be backed out of.
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanAgent;

impl HumanAgent {
    pub fn new() -> Self {
        Self
    }

    fn pick_node(&self, state: &GameState, prompt: &str, sites: Vec<NodeId>) -> Option<NodeId> {
        let labels: Vec<String> = sites
            .iter()
            .map(|node| {
                let corner = state.topology().intersection(*node);
                match corner.port {
                    Some(port) => format!("{} ({port} port)", corner.key),
                    None => corner.key.clone(),
                }
            })
            .collect();
        select(prompt, &labels).map(|index| sites[index])
    }

    fn pick_move(&self, state: &GameState, player: PlayerId) -> Option<Move> {
        let hand = &state.player(player).resources;
        let prompt = format!("{} holds {hand}", state.player(player).identity.name);
        loop {
            let categories: Vec<MoveCategory> = state.legal_moves(player).into_iter().collect();
            let mut labels: Vec<String> = categories
                .iter()
                .map(|c| category_label(*c).to_string())
                .collect();
            labels.push(SHOW_TABLE.to_string());
            let index = select(&prompt, &labels)?;
            let Some(category) = categories.get(index).copied() else {
                print!("{}", render_text(state, player));
                continue;
            };

            let moves = moves_in(state, player, category);
            if moves.len() == 1 {
                return moves.first().copied();
            }
            let mut labels: Vec<String> = moves.iter().map(|m| describe_move(state, m)).collect();
            labels.push(BACK.to_string());
            let index = select(category_label(category), &labels)?;
            if let Some(mv) = moves.get(index) {
                return Some(*mv);
            }
        }
    }
}

impl Agent for HumanAgent {
    fn initial_placement(&mut self, state: &GameState, player: PlayerId) -> Option<NodeId> {
        let prompt = format!("{}: opening settlement", state.player(player).identity.name);
        self.pick_node(state, &prompt, state.settlement_sites(player, true))
    }

    fn choose_road_location(
        &mut self,
        state: &GameState,
        player: PlayerId,
        request: RoadRequest,
    ) -> Option<EdgeId> {
        let sites = state.road_sites(player);
        let prompt = match request {
            RoadRequest::Initial(node) => {
                format!("road from {}", state.topology().intersection(node).key)
            }
            RoadRequest::Free => format!("free road ({} left)", state.free_roads(player)),
        };
        let labels: Vec<String> = sites
            .iter()
            .map(|edge| state.topology().edge(*edge).key.clone())
            .collect();
        select(&prompt, &labels).map(|index| sites[index])
    }

    fn robber(&mut self, state: &GameState, player: PlayerId) -> RobberChoice {
        let choices = robber_choices(state, player);
        let fallback = RobberChoice {
            tile: state.robber_tile(),
            victim: None,
        };
        let labels: Vec<String> = choices.iter().map(|c| describe_robber(state, c)).collect();
        select("robber", &labels)
            .and_then(|index| choices.get(index).copied())
            .or_else(|| choices.first().copied())
            .unwrap_or(fallback)
    }

    fn robber_discard(
        &mut self,
        state: &GameState,
        player: PlayerId,
        count: u8,
    ) -> ResourceBundle {
        let mut remaining = state.player(player).resources;
        let mut discard = ResourceBundle::zero();
        for left in (1..=count).rev() {
            let held: Vec<Resource> = Resource::ALL
                .into_iter()
                .filter(|r| remaining.get(*r) > 0)
                .collect();
            let labels: Vec<String> = held
                .iter()
                .map(|r| format!("{r} ({} held)", remaining.get(*r)))
                .collect();
            let prompt = format!("discard a card ({left} to go)");
            let index = select(&prompt, &labels).unwrap_or(0);
            let Some(resource) = held.get(index).copied() else {
                break;
            };
            if remaining.subtract(resource, 1).is_ok() {
                discard.add(resource, 1);
            }
        }
        discard
    }

    fn turn_action(&mut self, state: &GameState, player: PlayerId, _clock: &TurnClock) -> Move {
        self.pick_move(state, player).unwrap_or(Move::EndTurn)
    }
}

/// Dice rolled at the table: the operator types each total.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableTopDice;

impl Dice for TableTopDice {
    fn roll(&mut self, state: &mut GameState) -> u8 {
        let typed = Input::<u8>::new()
            .with_prompt("dice total")
            .validate_with(|total: &u8| -> Result<(), &str> {
                match (2..=12).contains(total) {
                    true => Ok(()),
                    false => Err("enter a total from 2 to 12"),
                }
            })
            .interact_text();
        match typed {
            Ok(total) => total,
            Err(e) => {
                log::error!("could not read dice total, rolling instead: {e}");
                state.roll_dice()
            }
        }
    }
}
