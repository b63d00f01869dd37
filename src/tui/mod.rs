//! TUI (Terminal User Interface) module for voip-sim.
//!
//! This module provides the interactive dashboard: a live chart of the
//! rolling sample window, the call-quality read-out, and keyboard-driven
//! configuration controls.

pub mod controller;
pub mod display_mode;
pub mod renderer;
pub mod state;

pub use controller::{run_dashboard, TuiController};
pub use display_mode::DisplayMode;
pub use state::{ConfigField, DashState};
