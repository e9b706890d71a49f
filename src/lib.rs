//! Space Adventure: a small terminal arcade shooter.
//!
//! The library holds everything that can run without a terminal: entity
//! data, per-frame simulation, the screen state machine, settings, asset
//! loading and the high-score file. The binary wires it to crossterm.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod explosion;
pub mod high_score;
pub mod kinematics;
pub mod pool;
pub mod screens;
pub mod spawner;
pub mod stars;
pub mod ui;
