//! Collision Explorer - Motor Vehicle Collision Dashboard
//!
//! Loads a bounded sample of collision records from CSV and derives the
//! dashboard's map, heatmap, per-minute breakdown and street ranking from it.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod query;
