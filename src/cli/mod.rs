//! CLI infrastructure for the OXO engine
//!
//! This module provides the command-line interface for playing against the
//! automated opponent, running headless simulations, and inspecting the
//! opponent model.

pub mod commands;
pub mod output;
