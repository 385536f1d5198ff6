//! CLI infrastructure for the qoxo toolkit
//!
//! This module provides the command-line interface for training levels via
//! self-play, requesting move inference, and inspecting trained tables.

pub mod commands;
pub mod output;
