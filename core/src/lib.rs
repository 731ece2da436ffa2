//! Case opener core: tier assignment, weighted outcome draws and the
//! tick-driven reveal state machine.

pub mod animator;
pub mod assigner;
pub mod clock;
pub mod command;
pub mod config;
pub mod cue;
pub mod error;
pub mod event;
pub mod items;
pub mod outcome;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod tier;
pub mod types;
