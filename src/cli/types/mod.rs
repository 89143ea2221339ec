//! Type-safe wrappers and enums for league data.

pub mod ids;
pub mod position;


pub use ids::{GameId, PlayerId, TeamId};
pub use position::Position;
