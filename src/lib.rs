//! Pokedex gallery data core
//!
//! Fetches creature data from the PokeAPI catalog and assembles
//! display-ready records for the gallery UI: catalog transport,
//! record assembly, per-generation roster caching, and bounded
//! batch loading.

pub mod assembler;
pub mod batch;
pub mod catalog;
pub mod roster;
pub mod settings;
pub mod state;
