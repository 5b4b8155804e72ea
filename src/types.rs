use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Resource {
    Wheat,
    Wood,
    Sheep,
    Clay,
    Rock,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Wheat,
        Resource::Wood,
        Resource::Sheep,
        Resource::Clay,
        Resource::Rock,
    ];

    pub const fn index(self) -> usize {
        match self {
            Resource::Wheat => 0,
            Resource::Wood => 1,
            Resource::Sheep => 2,
            Resource::Clay => 3,
            Resource::Rock => 4,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DevelopmentCard {
    Soldier,
    Monopoly,
    YearOfPlenty,
    RoadBuilding,
    VictoryPoint,
}

impl DevelopmentCard {
    pub const ALL: [DevelopmentCard; 5] = [
        DevelopmentCard::Soldier,
        DevelopmentCard::Monopoly,
        DevelopmentCard::YearOfPlenty,
        DevelopmentCard::RoadBuilding,
        DevelopmentCard::VictoryPoint,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum BuildingKind {
    Settlement,
    City,
    Road,
}

/// Things a player can buy from the bank.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Purchase {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Color {
    Red,
    Blue,
    Orange,
    White,
    Green,
}

impl Color {
    pub const ORDERED: [Color; 5] = [
        Color::Red,
        Color::Blue,
        Color::Orange,
        Color::White,
        Color::Green,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// 3:1 on any resource.
    Any,
    /// 2:1 on one resource.
    Specific(Resource),
}

impl PortKind {
    pub fn ratio(self) -> u8 {
        match self {
            PortKind::Any => 3,
            PortKind::Specific(_) => 2,
        }
    }

    pub fn applies_to(self, resource: Resource) -> bool {
        match self {
            PortKind::Any => true,
            PortKind::Specific(r) => r == resource,
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Any => write!(f, "3:1"),
            PortKind::Specific(resource) => write!(f, "2:1 {resource}"),
        }
    }
}
