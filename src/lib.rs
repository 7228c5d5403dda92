//! Turns a flat company sheet into a layered, colored and seeded graph for
//! force-directed rendering.

pub mod config;
pub mod graph;
pub mod layout;
pub mod sheet;
pub mod util;
