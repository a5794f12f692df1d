//! Snake with an online top-10 leaderboard.
//!
//! The `snake_leaderboard` binary serves the leaderboard over HTTP,
//! the `snake` binary is a terminal game that submits to it.

pub mod client;
pub mod config;
pub mod cors;
pub mod database;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod server;
pub mod session;

#[cfg(test)]
mod tests;
