pub mod analytics;
pub mod battle;
pub mod damage;
pub mod error;
pub mod events;
pub mod factory;
pub mod replay;
pub mod rng;
pub mod state;
pub mod statuses;
pub mod utils;
