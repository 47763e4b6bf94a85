//! Lane Traffic Simulation Library
//!
//! A discrete-time, multi-lane car-following simulation that runs headless
//! and hands a snapshot of its state to any external renderer each tick.

pub mod simulation;
