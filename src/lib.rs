//! Cascade COGS: cost of goods sold for multi-step manufacturing processes
//!
//! Each step adds material and conversion cost to the unit carried from the
//! previous step, then divides by its yield. Sensitivity and scenario
//! analysis are built on the same cascade.

pub mod cli;
pub mod core;
pub mod entities;
pub mod format;
