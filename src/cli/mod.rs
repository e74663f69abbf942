//! CLI module for the user directory
//!
//! Provides the `serve` subcommand running the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// User Directory - account registration, sessions, and profile management
#[derive(Parser)]
#[command(name = "user-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
