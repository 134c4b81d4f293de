//! Command-line front end for building and inspecting Plasma instructions.

pub mod cli;
pub mod commands;
pub mod logs;
