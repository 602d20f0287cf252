use super::TokenIssuer;
use crate::model::User;
use crate::storage::CatalogStore;
use axum::http::{HeaderMap, header::AUTHORIZATION};

/// The user a request was authenticated as.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub User);

/// Extracts the token of a `Bearer` authorization header. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves a raw token to the user it was issued for.
///
/// Every failure (bad signature, expired, unknown user, store error) yields
/// `None`; rejecting anonymous access is up to the individual mutation.
pub fn identify_token(store: &CatalogStore, tokens: &TokenIssuer, token: &str) -> Option<CurrentUser> {
    let claims = match tokens.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected bearer token");
            return None;
        }
    };

    match store.get_user(&claims.id) {
        Ok(Some(user)) => {
            tracing::debug!(username = %user.username, "Authenticated request");
            Some(CurrentUser(user))
        }
        Ok(None) => {
            tracing::warn!(id = %claims.id, "Token refers to unknown user");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve token user");
            None
        }
    }
}

/// Resolves the identity of a request from its headers.
pub fn identify(store: &CatalogStore, tokens: &TokenIssuer, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = bearer_token(headers)?;
    identify_token(store, tokens, token)
}
