use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::heuristic::stats::Stats;
use crate::types::{DevelopmentCard, PortKind, Purchase, Resource};

/// Named additive score terms. The evaluation is the sum of the values.
pub type ModMap = BTreeMap<String, f64>;

pub const PORT_PREFIX: &str = "port_";

/// One link in the evaluation chain. Each reads the stats and adds or
/// overwrites terms; later links see what earlier ones wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    Default,
    IgnorePorts,
    EarlyExpansion,
    FavourResources(BTreeSet<Resource>),
    DevCardSpam,
}

impl Modifier {
    pub fn apply(&self, stats: &Stats, mods: &mut ModMap) {
        match self {
            Modifier::Default => default_weights(stats, mods),
            Modifier::IgnorePorts => {
                for (key, value) in mods.iter_mut() {
                    if key.starts_with(PORT_PREFIX) {
                        *value = -50.0;
                    }
                }
            }
            Modifier::EarlyExpansion => {
                if stats.turn < 15 || stats.road_count < 7 {
                    set(mods, "early_roads", 8.0 * stats.road_count as f64);
                    set(
                        mods,
                        "available_positions",
                        15.0 * stats.available_settlements as f64,
                    );
                }
            }
            Modifier::FavourResources(favoured) => {
                let held: f64 = favoured
                    .iter()
                    .map(|r| stats.resources.get(r).copied().unwrap_or(0) as f64)
                    .sum();
                let rolls: f64 = favoured.iter().map(|r| stats.rolls_of(*r) as f64).sum();
                set(mods, "favour_hand", 2.0 * held);
                set(mods, "favour_rolls", 3.0 * rolls);
            }
            Modifier::DevCardSpam => {
                let rolls: u32 = [Resource::Sheep, Resource::Rock, Resource::Wheat]
                    .into_iter()
                    .map(|r| stats.rolls_of(r))
                    .sum();
                set(mods, "dev_spam_rolls", 3.0 * rolls as f64);
                set(mods, "dev_spam_played", 3.0 * stats.dev_cards_played as f64);
            }
        }
    }
}

fn set(mods: &mut ModMap, key: &str, value: f64) {
    mods.insert(key.to_string(), value);
}

fn default_weights(stats: &Stats, mods: &mut ModMap) {
    let vp = stats.victory_points;
    set(mods, "vp", 10.0 * vp as f64);
    if vp + 1 == stats.target_score {
        set(mods, "vp_near_win", 10_000.0);
    }
    let best_opponent = stats.best_opponent_points();
    if vp > best_opponent {
        set(mods, "vp_lead", 100.0);
    } else if vp == best_opponent {
        set(mods, "vp_lead", 50.0);
    }

    for site in &stats.settlements {
        let value = 500.0 + 2.0 * site.frequency as f64 + 2.0 * site.adjacency as f64;
        set(mods, &format!("settlement_{}", site.node), value);
    }
    for site in &stats.cities {
        let value = 1000.0 + 3.0 * site.frequency as f64 + 2.0 * site.adjacency as f64;
        set(mods, &format!("city_{}", site.node), value);
    }

    let best_rolls = stats.roll_map.values().copied().max().unwrap_or(0);
    for (index, port) in stats.ports.iter().enumerate() {
        let value = match port {
            PortKind::Any => 2.0 * best_rolls as f64,
            PortKind::Specific(resource) => 2.0 * stats.rolls_of(*resource) as f64,
        };
        set(mods, &format!("{PORT_PREFIX}{index}"), value);
    }

    if let Some(distance) = stats.average_distance {
        if distance < 6.0 {
            set(mods, "spacing", 10.0);
        } else if distance > 8.0 {
            set(mods, "spacing", -10.0);
        }
    }

    let hand = stats.hand_size() as f64;
    set(mods, "hand_overflow", -0.5 * (hand - 12.0).max(0.0));
    let devs = stats.dev_card_total() as f64;
    set(mods, "dev_overflow", -0.5 * (devs - 12.0).max(0.0));

    for (purchase, bonus) in [
        (Purchase::City, 50.0),
        (Purchase::Settlement, 25.0),
        (Purchase::Road, 10.0),
        (Purchase::DevelopmentCard, 10.0),
    ] {
        if stats.affordable.contains(&purchase) {
            set(mods, &format!("ready_{purchase}"), bonus);
        }
    }

    if stats.has_longest_road {
        set(mods, "longest_road_award", 50.0);
    }
    if stats.has_largest_army {
        set(mods, "largest_army_award", 50.0);
    }
    set(mods, "army", 3.0 * stats.army as f64);
    let road_weight = if stats.has_longest_road { 3.0 } else { 7.0 };
    set(mods, "road_length", road_weight * stats.longest_road as f64);
    if stats.army > stats.max_opponent_army + 2 {
        set(mods, "army_lead", -25.0);
    }

    let roads = stats.road_count as f64;
    set(mods, "road_overflow", -1.5 * (roads - 10.0).max(0.0));
    let buildings = stats.building_count();
    if buildings > 0 && stats.road_count <= 2 * buildings {
        set(mods, "road_spread", 25.0);
    }

    set(
        mods,
        "available_positions",
        5.0 * stats.available_settlements as f64,
    );
    set(
        mods,
        "opponents_on_roads",
        -5.0 * stats.opponents_on_roads as f64,
    );
    set(
        mods,
        "connected_settlements",
        3.0 * stats.connected_settlements as f64,
    );

    let vp_cards = stats
        .dev_cards
        .get(&DevelopmentCard::VictoryPoint)
        .copied()
        .unwrap_or(0);
    set(mods, "vp_cards", -5.0 * vp_cards as f64);
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Default => write!(f, "default"),
            Modifier::IgnorePorts => write!(f, "ignore_ports"),
            Modifier::EarlyExpansion => write!(f, "early_expansion"),
            Modifier::FavourResources(set) => write!(f, "favour={}", set.iter().join("+")),
            Modifier::DevCardSpam => write!(f, "dev_card_spam"),
        }
    }
}

impl FromStr for Modifier {
    type Err = String;

    /// Accepts the names printed by `Display`, e.g. `favour=wheat+rock`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Some(list) = lowered.strip_prefix("favour=") {
            let favoured = list
                .split('+')
                .map(|name| {
                    name.parse::<Resource>()
                        .map_err(|_| format!("unknown resource in modifier: {name}"))
                })
                .collect::<Result<BTreeSet<_>, _>>()?;
            if favoured.is_empty() {
                return Err("favour needs at least one resource".to_string());
            }
            return Ok(Modifier::FavourResources(favoured));
        }
        match lowered.as_str() {
            "default" => Ok(Modifier::Default),
            "ignore_ports" => Ok(Modifier::IgnorePorts),
            "early_expansion" => Ok(Modifier::EarlyExpansion),
            "dev_card_spam" => Ok(Modifier::DevCardSpam),
            _ => Err(format!("unknown modifier: {s}")),
        }
    }
}
