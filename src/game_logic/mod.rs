pub mod bezier;
pub mod collisions;
pub mod components;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod impacts;
pub mod lap_system;
pub mod opponent;
pub mod physics;
pub mod simulation;
pub mod track;
pub mod vector;

pub use bezier::*;
pub use collisions::*;
pub use components::*;
pub use config::*;
pub use constants::*;
pub use difficulty::*;
pub use error::*;
pub use impacts::*;
pub use lap_system::*;
pub use opponent::*;
pub use physics::*;
pub use simulation::*;
pub use track::*;
