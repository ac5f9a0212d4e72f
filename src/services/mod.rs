pub mod leaderboard;
pub mod league;
pub mod ledger;

pub use league::LeagueService;
