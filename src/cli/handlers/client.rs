use anyhow::{Context, Result};

use crate::client::{HttpApi, TokenStore, run_client};

use super::CommandContext;

pub fn handle_client(ctx: CommandContext, endpoint: Option<String>) -> Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| ctx.config.client.endpoint.clone());
    let token_store = TokenStore::default_location()
        .context("Could not determine a directory for the login token")?;
    let api = HttpApi::new(&endpoint)?;

    run_client(api, token_store, &ctx.config.client)?;
    Ok(())
}
