//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;
use teatrack_core::ProfileId;

/// Available commands for the teatrack tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides TEATRACK_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Secret used to verify bearer tokens
        #[arg(long, env = "TEATRACK_JWT_SECRET", hide_env_values = true)]
        jwt_secret: Option<String>,
        /// Allowed CORS origin (repeatable; default allows all)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        request_timeout_secs: Option<u64>,
    },

    /// List every factory in the directory
    List,

    /// Show one profile with its price summary
    Show {
        /// Profile ID
        id: ProfileId,
    },

    /// Print the price history of a profile, oldest first
    History {
        /// Profile ID
        id: ProfileId,
    },

    /// Issue a bearer token for a user (development helper)
    Token {
        /// User id to put in the token
        #[arg(short, long)]
        user: String,
        /// Token lifetime in hours (at most ten years)
        #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..=87_600))]
        ttl_hours: u32,
        /// Signing secret
        #[arg(long, env = "TEATRACK_JWT_SECRET", hide_env_values = true)]
        jwt_secret: Option<String>,
    },

    /// Show resolved data and database paths
    Paths,
}
