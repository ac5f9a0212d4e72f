pub mod league;
pub mod shared;
