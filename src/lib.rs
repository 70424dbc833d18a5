//! Fruit-merge drop game library
//!
//! Game logic for a container-stacking merge game: steer and drop fruits into
//! a tall container, merge equal ranks into the next rank, survive the
//! overflow line. Physics is delegated to Rapier via `bevy_rapier2d`;
//! rendering, windowing, and input capture to Bevy.

pub mod arena;
pub mod config;
pub mod constants;
pub mod dropper;
pub mod error;
pub mod fruit;
pub mod input;
pub mod menu;
pub mod merge;
pub mod rendering;
pub mod score;
