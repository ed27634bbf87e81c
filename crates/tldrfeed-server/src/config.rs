//! Server configuration
//!
//! Parsed once from the command line (with environment fallbacks) and
//! passed explicitly to whatever needs it.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use crate::adapters::MongoConfig;

/// Storage backend behind the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// MongoDB document store
    Mongo,
    /// Process-local memory, lost on exit
    Memory,
}

/// tldrfeed server settings
#[derive(Debug, Clone, Parser)]
#[command(name = "tldrfeed-server")]
#[command(about = "Run the tldrfeed server", long_about = None)]
#[command(version)]
pub struct ServerConfig {
    /// Port to bind to
    #[arg(short, long, env = "TLDRFEED_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Indent JSON nicely in rendered API responses
    #[arg(short, long, env = "TLDRFEED_INDENT_JSON")]
    pub indent_json: bool,

    /// DB connection URL
    #[arg(short, long, env = "TLDRFEED_DB", default_value = "mongodb://localhost:27017")]
    pub db: String,

    /// DB name
    #[arg(long, env = "TLDRFEED_DB_NAME", default_value = "tldrfeed")]
    pub db_name: String,

    /// Storage backend
    #[arg(short, long, env = "TLDRFEED_BACKEND", value_enum, default_value_t = Backend::Mongo)]
    pub backend: Backend,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn mongo(&self) -> MongoConfig {
        MongoConfig {
            uri: self.db.clone(),
            database: self.db_name.clone(),
            reset: false,
        }
    }
}
