use serde::{Deserialize, Serialize};

pub type TeamId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group: Group,
    pub logo: String, // display token, usually an emoji
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInput {
    pub id: Option<TeamId>,
    pub name: String,
    pub group: Group,
    pub logo: Option<String>,
}

/// Group labels are a small fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::A, Group::B];
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

impl std::str::FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Group::A),
            "B" => Ok(Group::B),
            _ => Err(format!("Invalid group: {}", s)),
        }
    }
}

pub const DEFAULT_LOGOS: [&str; 8] = ["⚽", "🏆", "⭐", "🦁", "🦅", "🐺", "🐆", "🔥"];
