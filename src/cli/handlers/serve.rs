use anyhow::{Context, Result};

use crate::server::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, port: Option<u16>, host: Option<String>) -> Result<()> {
    let port = port.unwrap_or(ctx.config.server.port);
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());

    let state = ctx.app_state()?;

    println!("Starting GraphQL server on http://{}:{}", host, port);
    println!("GraphiQL: http://{}:{}/", host, port);

    tokio::runtime::Runtime::new()?
        .block_on(run_server(state, &host, port))
        .with_context(|| format!("Failed to serve on {}:{}", host, port))?;
    Ok(())
}
