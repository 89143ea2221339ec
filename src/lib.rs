//! Roster-aware fantasy football stat forecasting
//!
//! Builds point-in-time training data from a league database and fits one
//! regression model per stat for a position.
//!
//! ## Features
//!
//! - **Roster Resolution**: Which team a player belonged to on any date
//! - **Performance Windows**: Recent games for a player, or against a defense
//! - **Rank Selection**: One representative performance per game and side
//! - **Training Data**: Leak-free feature tables with player and defense averages
//! - **Models**: Random forest by default, ordinary least squares as an alternative
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffa_predict::{
//!     model::{train_position_models, RandomForestRegressor},
//!     pipeline::{build_training_dataset, PipelineConfig, RosterResolver},
//!     storage::LeagueDatabase,
//!     Position,
//! };
//!
//! # fn example() -> ffa_predict::Result<()> {
//! let db = LeagueDatabase::open(std::path::Path::new("league.db"))?;
//! let config = PipelineConfig::default();
//!
//! let mut resolver = RosterResolver::new(&db);
//! let dataset = build_training_dataset(&mut resolver, Position::RB, None, &config)?;
//! let models = train_position_models(&dataset, &RandomForestRegressor::default(), &config)?;
//! println!("trained {} stat models", models.models.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a database without passing `--database` every time:
//! ```bash
//! export FFA_DATABASE_PATH=~/league.db
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{GameId, PlayerId, Position, TeamId};
pub use error::{FfaError, Result};
pub use storage::Stat;

pub const DATABASE_PATH_ENV_VAR: &str = "FFA_DATABASE_PATH";
