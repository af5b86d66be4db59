pub mod combat;
pub mod config;
pub mod creature;
pub mod error;
pub mod evolution;
pub mod server;
pub mod simulation;
pub mod stats;
pub mod world;
