use std::fmt::Write as _;

use itertools::Itertools;

use crate::config::DisplayMode;
use crate::game::action::{CardPlay, Move, PlayerId, RobberChoice};
use crate::game::game::{GameSummary, Observer};
use crate::game::state::{GameState, Structure};
use crate::types::Resource;

/// Printed width of one tile cell, including the trailing space.
const CELL_WIDTH: usize = 11;

fn resource_tag(resource: Option<Resource>) -> &'static str {
    match resource {
        Some(Resource::Wheat) => "wh",
        Some(Resource::Wood) => "wo",
        Some(Resource::Sheep) => "sh",
        Some(Resource::Clay) => "cl",
        Some(Resource::Rock) => "ro",
        None => "--",
    }
}

fn name(state: &GameState, player: PlayerId) -> &str {
    &state.player(player).identity.name
}

fn robber_label(state: &GameState, choice: &RobberChoice) -> String {
    let tile = state.topology().tile(choice.tile);
    match choice.victim {
        Some(victim) => format!("tile {} stealing from {}", tile.letter, name(state, victim)),
        None => format!("tile {}", tile.letter),
    }
}

/// A move phrased with board keys instead of arena handles.
pub fn describe_move(state: &GameState, mv: &Move) -> String {
    let topology = state.topology();
    match mv {
        Move::BuildSettlement(node) => {
            format!("build settlement at {}", topology.intersection(*node).key)
        }
        Move::BuildCity(node) => format!("build city at {}", topology.intersection(*node).key),
        Move::BuildRoad(edge) => format!("build road on {}", topology.edge(*edge).key),
        Move::PlayDevelopmentCard(CardPlay::Soldier(choice)) => {
            format!("play soldier on {}", robber_label(state, choice))
        }
        other => other.to_string(),
    }
}

pub fn describe_robber(state: &GameState, choice: &RobberChoice) -> String {
    format!("move robber to {}", robber_label(state, choice))
}

/// The hex grid, one cell per tile: letter, resource, dice number, and `R`
/// on the robber's tile.
pub fn render_board(state: &GameState) -> String {
    let mut rows = state
        .tiles()
        .iter()
        .into_group_map_by(|tile| tile.coord.z)
        .into_iter()
        .collect_vec();
    rows.sort_by_key(|(row, _)| *row);

    let mut out = String::new();
    for (row, mut tiles) in rows {
        tiles.sort_by_key(|tile| tile.coord.x);
        let first = tiles.first().map_or(0, |tile| 2 * tile.coord.x + row);
        let indent = ((first + 4).max(0) as usize) * CELL_WIDTH / 2;
        out.push_str(&" ".repeat(indent));
        for tile in tiles {
            let robber = if state.contains_robber(tile.id) { 'R' } else { ' ' };
            let _ = write!(
                out,
                "[{} {} {:>2}{}] ",
                tile.letter,
                resource_tag(tile.resource),
                tile.number,
                robber
            );
        }
        out.push('\n');
    }

    for (player, ps) in state.players().iter().enumerate() {
        let holdings = state
            .holdings_of(player)
            .filter_map(|(node, _)| {
                let mark = structure_mark(state.building(node)?);
                Some(format!("{mark}:{}", state.topology().intersection(node).key))
            })
            .join(" ");
        let _ = writeln!(out, "{:<8} {holdings}", ps.identity.name);
    }
    out
}

/// Hands, scores and awards, one line per player.
pub fn render_text(state: &GameState, current: PlayerId) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "round {} | {} to move | robber on {} | bank {}",
        state.round,
        name(state, current),
        state.topology().tile(state.robber_tile()).letter,
        state.resource_deck(),
    );
    for (player, ps) in state.players().iter().enumerate() {
        let mut awards = Vec::new();
        if state.longest_road_holder().is_some_and(|(holder, _)| holder == player) {
            awards.push("longest road");
        }
        if state.largest_army_holder().is_some_and(|(holder, _)| holder == player) {
            awards.push("largest army");
        }
        let _ = writeln!(
            out,
            "{} {:<8} {:>2} VP | {} | {} dev cards | {} soldiers | road {}{}",
            if player == current { '>' } else { ' ' },
            ps.identity.name,
            ps.victory_points,
            ps.resources,
            ps.dev_card_total(),
            ps.played_soldiers,
            state.road_length(player),
            if awards.is_empty() {
                String::new()
            } else {
                format!(" | {}", awards.join(", "))
            },
        );
    }
    out
}

/// Prints the table to stdout at the start of every turn.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDisplay {
    mode: DisplayMode,
}

impl TerminalDisplay {
    pub fn new(mode: DisplayMode) -> Self {
        Self { mode }
    }
}

impl Observer for TerminalDisplay {
    fn turn_started(&mut self, state: &GameState, player: PlayerId) {
        if self.mode == DisplayMode::Board {
            println!("{}", render_board(state));
        }
        print!("{}", render_text(state, player));
    }

    fn game_finished(&mut self, state: &GameState, summary: &GameSummary) {
        println!("{}", render_board(state));
        println!("{summary}");
    }
}

fn structure_mark(structure: Structure) -> char {
    match structure {
        Structure::Settlement { .. } => 's',
        Structure::City { .. } => 'C',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::players::PlayerIdentity;
    use crate::types::{Color, PlayerKind};

    fn state() -> GameState {
        let identities = vec![
            PlayerIdentity::new(1, Color::Red, PlayerKind::Ai),
            PlayerIdentity::new(2, Color::Blue, PlayerKind::Human),
        ];
        GameState::new(identities, &GameConfig::default())
    }

    #[test]
    fn board_shows_every_tile_and_the_robber() {
        let s = state();
        let board = render_board(&s);
        for letter in 'a'..='s' {
            assert!(board.contains(&format!("[{letter} ")), "{letter}");
        }
        assert!(board.contains("[n --  7R]"));
        let widths = board.lines().take(5).map(|l| l.matches('[').count()).collect_vec();
        assert_eq!(widths, vec![3, 4, 5, 4, 3]);
    }

    #[test]
    fn moves_are_named_by_board_keys() {
        let s = state();
        let node = s.topology().node("i,j,n").unwrap();
        assert_eq!(
            describe_move(&s, &Move::BuildSettlement(node)),
            "build settlement at i,j,n"
        );
        assert_eq!(describe_move(&s, &Move::EndTurn), "end turn");
    }

    #[test]
    fn text_marks_the_current_player() {
        let s = state();
        let text = render_text(&s, 1);
        assert!(text.contains("> blue"));
        assert!(text.contains("  red"));
    }
}
