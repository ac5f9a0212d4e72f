use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Match, MatchId, NewsItem, NewsId, Player, PlayerId, Round, RoundId, Standings, Team, TeamId,
    empty_standings,
};

/// Team-of-the-season capacity.
pub const TOTS_CAPACITY: usize = 5;

/// Aggregate root and unit of persistence. Stores always read and write the
/// whole document.
///
/// `teams`, `players` and `matches` are required for a stored document to be
/// considered structurally valid; the other collections default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueDocument {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub tots: Vec<PlayerId>,
    #[serde(default = "empty_standings")]
    pub standings: Standings,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for LeagueDocument {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            players: Vec::new(),
            matches: Vec::new(),
            rounds: Vec::new(),
            news: Vec::new(),
            tots: Vec::new(),
            standings: empty_standings(),
            last_update: None,
        }
    }
}

impl LeagueDocument {
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == id)
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn news_item(&self, id: NewsId) -> Option<&NewsItem> {
        self.news.iter().find(|n| n.id == id)
    }

    pub fn players_of(&self, team_id: TeamId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team_id == team_id)
    }
}

/// Records with an integer identity unique within their collection.
pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_identified!(Team, Player, Round, Match, NewsItem);

/// `max(existing) + 1`, or `1` for an empty collection. Always computed from
/// the current contents so ids freed by deletion never collide.
pub fn next_id<T: Identified>(items: &[T]) -> i64 {
    items.iter().map(Identified::id).max().map_or(1, |max| max + 1)
}
