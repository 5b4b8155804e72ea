use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, NodeId, TileId};
use crate::game::resources::ResourceBundle;
use crate::types::{DevelopmentCard, Resource};

/// Index of a player in turn order.
pub type PlayerId = usize;

/// The coarse kinds of move `legal_moves` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    EndTurn,
    BuildSettlement,
    BuildCity,
    BuildRoad,
    BuyDevelopmentCard,
    PlayDevelopmentCard,
    TradeWithBank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobberChoice {
    pub tile: TileId,
    pub victim: Option<PlayerId>,
}

/// A development card together with the arguments its effect needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardPlay {
    Soldier(RobberChoice),
    Monopoly(Resource),
    YearOfPlenty(Resource, Resource),
    /// The two free roads are placed afterwards, one request at a time.
    RoadBuilding,
}

impl CardPlay {
    pub fn card(&self) -> DevelopmentCard {
        match self {
            CardPlay::Soldier(_) => DevelopmentCard::Soldier,
            CardPlay::Monopoly(_) => DevelopmentCard::Monopoly,
            CardPlay::YearOfPlenty(..) => DevelopmentCard::YearOfPlenty,
            CardPlay::RoadBuilding => DevelopmentCard::RoadBuilding,
        }
    }
}

/// A fully specified action taken during a player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    EndTurn,
    BuildSettlement(NodeId),
    BuildCity(NodeId),
    BuildRoad(EdgeId),
    BuyDevelopmentCard,
    PlayDevelopmentCard(CardPlay),
    TradeWithBank { give: Resource, get: Resource },
}

impl Move {
    pub fn category(&self) -> MoveCategory {
        match self {
            Move::EndTurn => MoveCategory::EndTurn,
            Move::BuildSettlement(_) => MoveCategory::BuildSettlement,
            Move::BuildCity(_) => MoveCategory::BuildCity,
            Move::BuildRoad(_) => MoveCategory::BuildRoad,
            Move::BuyDevelopmentCard => MoveCategory::BuyDevelopmentCard,
            Move::PlayDevelopmentCard(_) => MoveCategory::PlayDevelopmentCard,
            Move::TradeWithBank { .. } => MoveCategory::TradeWithBank,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::EndTurn => write!(f, "end turn"),
            Move::BuildSettlement(node) => write!(f, "build settlement at #{node}"),
            Move::BuildCity(node) => write!(f, "build city at #{node}"),
            Move::BuildRoad(edge) => write!(f, "build road on #{edge}"),
            Move::BuyDevelopmentCard => write!(f, "buy development card"),
            Move::PlayDevelopmentCard(play) => match play {
                CardPlay::Soldier(choice) => write!(f, "play soldier on tile #{}", choice.tile),
                CardPlay::Monopoly(resource) => write!(f, "play monopoly on {resource}"),
                CardPlay::YearOfPlenty(a, b) => write!(f, "play year of plenty for {a} and {b}"),
                CardPlay::RoadBuilding => write!(f, "play road building"),
            },
            Move::TradeWithBank { give, get } => write!(f, "trade {give} for {get}"),
        }
    }
}

/// What a dice roll did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    Produced {
        gains: Vec<(PlayerId, ResourceBundle)>,
        /// Resources the bank could not pay out in full.
        shortages: Vec<Resource>,
    },
    /// A seven: these players must discard this many cards before the robber
    /// moves.
    Seven { discards: Vec<(PlayerId, u8)> },
}
