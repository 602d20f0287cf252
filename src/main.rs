use anyhow::Result;
use clap::Parser;

use library_catalog::cli::handlers::{
    CommandContext, handle_client, handle_init, handle_mutate, handle_query, handle_seed,
    handle_serve,
};
use library_catalog::cli::{Cli, Commands};
use library_catalog::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Client { .. } => logging::init_for_tui(cli.verbose, cli.log_file.clone()),
        _ => logging::init(cli.verbose, cli.log_file.clone()),
    }

    let ctx = CommandContext::load(&cli)?;
    tracing::debug!(root = %ctx.root.display(), "Loaded configuration");

    match cli.command {
        Commands::Init => handle_init(ctx),
        Commands::Serve { port, host } => handle_serve(ctx, port, host),
        Commands::Query {
            query,
            variables,
            token,
        } => handle_query(ctx, query, variables, token),
        Commands::Mutate {
            mutation,
            variables,
            token,
        } => handle_mutate(ctx, mutation, variables, token),
        Commands::Seed => handle_seed(ctx),
        Commands::Client { endpoint } => handle_client(ctx, endpoint),
    }
}
