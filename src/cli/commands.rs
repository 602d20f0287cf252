use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "library")]
#[command(
    author,
    version,
    about = "A GraphQL library catalog server with a terminal client"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .library.yml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URI, e.g. memory:// or file://.library (overrides config)
    #[arg(long, global = true, env = "LIBRARY_DATABASE_URI")]
    pub database_uri: Option<String>,

    /// Secret used to sign login tokens (overrides config)
    #[arg(long, global = true, env = "LIBRARY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .library.yml and create the data directory
    Init,

    /// Start the GraphQL HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "LIBRARY_PORT")]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,
    },

    /// Execute a GraphQL query against the local store
    Query {
        /// GraphQL document
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,

        /// Login token to authenticate the request with
        #[arg(long, env = "LIBRARY_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,

        /// Login token to authenticate the request with
        #[arg(long, env = "LIBRARY_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Load a sample catalog into the store
    Seed,

    /// Open the interactive terminal client
    #[command(visible_alias = "tui")]
    Client {
        /// GraphQL endpoint of a running server (overrides config)
        #[arg(long, env = "LIBRARY_ENDPOINT")]
        endpoint: Option<String>,
    },
}
