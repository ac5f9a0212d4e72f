pub mod document;
pub mod fixture;
pub mod news;
pub mod player;
pub mod round;
pub mod standing;
pub mod team;

// Re-export all models for easy importing
pub use document::*;
pub use fixture::*;
pub use news::*;
pub use player::*;
pub use round::*;
pub use standing::*;
pub use team::*;
