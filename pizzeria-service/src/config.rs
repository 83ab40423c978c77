use std::net::SocketAddr;

use clap::Args;

/// Runtime settings, read from flags or the environment (`.env` included).
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// SQLite database path
    #[arg(long, env = "DATABASE_URL", default_value = "app.db")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5555")]
    pub bind_addr: SocketAddr,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,
}
