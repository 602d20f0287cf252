use crate::auth;
use crate::graphql::build_schema;
use anyhow::{Context, Result};

use super::CommandContext;

/// Run `document` against the local store and print the JSON response.
pub(super) fn execute_document(
    ctx: &CommandContext,
    document: &str,
    variables: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let state = ctx.app_state()?;
    let schema = build_schema(state.clone());

    let vars: async_graphql::Variables = match variables {
        Some(v) => serde_json::from_str(&v).context("Variables must be a JSON object")?,
        None => async_graphql::Variables::default(),
    };

    let mut request = async_graphql::Request::new(document).variables(vars);
    if let Some(token) = token {
        match auth::identify_token(&state.store, &state.tokens, &token) {
            Some(user) => request = request.data(user),
            None => eprintln!("warning: token rejected, running unauthenticated"),
        }
    }

    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.errors.is_empty() {
        anyhow::bail!("{}", response.errors[0].message);
    }
    Ok(())
}

pub fn handle_query(
    ctx: CommandContext,
    query: String,
    variables: Option<String>,
    token: Option<String>,
) -> Result<()> {
    execute_document(&ctx, &query, variables, token)
}
