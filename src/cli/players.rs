use crate::cli::human::HumanAgent;
use crate::config::{GameConfig, SetupError};
use crate::heuristic::{Heuristic, Modifier};
use crate::players::{Agent, MinimaxAgent, RandomAgent};
use crate::types::PlayerKind;

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "H",
        name: "HumanAgent",
        description: "Prompts at the terminal for every decision.",
    },
    CliPlayer {
        code: "R",
        name: "RandomAgent",
        description: "Chooses a move category at random, then a move inside it.",
    },
    CliPlayer {
        code: "A",
        name: "MinimaxAgent",
        description: "Looks ahead with the heuristic. Append modifiers with ':', e.g. A:ignore_ports:favour=wheat+rock.",
    },
];

/// Builds the agent named by a player code such as `R` or `A:early_expansion`.
/// `seat` perturbs the seed so that identical codes do not play identically.
pub fn create_agent(
    spec: &str,
    seat: usize,
    config: &GameConfig,
) -> Result<(PlayerKind, Box<dyn Agent>), SetupError> {
    let mut parts = spec.trim().split(':');
    let code = parts.next().unwrap_or_default().to_ascii_uppercase();
    let params: Vec<&str> = parts.filter(|p| !p.is_empty()).collect();
    let seed = config.seed.wrapping_add(seat as u64);

    match code.as_str() {
        "H" if params.is_empty() => Ok((PlayerKind::Human, Box::new(HumanAgent::new()))),
        "R" if params.is_empty() => Ok((PlayerKind::Ai, Box::new(RandomAgent::new(seed)))),
        "A" => {
            let modifiers = params
                .iter()
                .map(|p| p.parse::<Modifier>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(SetupError::Options)?;
            let agent = MinimaxAgent::from_config(Heuristic::new(modifiers), config, seat as u64);
            Ok((PlayerKind::Ai, Box::new(agent)))
        }
        _ => Err(SetupError::UnknownPlayerCode(spec.to_string())),
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<14} DESCRIPTION", "CODE", "PLAYER");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<14} {}", player.code, player.name, player.description);
    }
    println!();
    println!("Modifiers: default, ignore_ports, early_expansion, dev_card_spam, favour=<r>+<r>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_case_insensitive() {
        let config = GameConfig::default();
        let (kind, _) = create_agent("r", 0, &config).unwrap();
        assert_eq!(kind, PlayerKind::Ai);
        let (kind, _) = create_agent("A:ignore_ports:favour=wheat+rock", 1, &config).unwrap();
        assert_eq!(kind, PlayerKind::Ai);
    }

    #[test]
    fn rejects_unknown_codes_and_modifiers() {
        let config = GameConfig::default();
        assert!(matches!(
            create_agent("X", 0, &config),
            Err(SetupError::UnknownPlayerCode(code)) if code == "X"
        ));
        assert!(matches!(
            create_agent("R:fast", 0, &config),
            Err(SetupError::UnknownPlayerCode(_))
        ));
        assert!(matches!(
            create_agent("A:greedy", 0, &config),
            Err(SetupError::Options(_))
        ));
    }
}
