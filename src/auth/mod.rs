//! Token based identity for API requests.
//!
//! `login` issues an HS256 JWT through [`TokenIssuer`]; every later request
//! may present it as `Authorization: Bearer <token>`. [`identify`] turns
//! such a header back into the [`CurrentUser`] resolvers see.

mod gate;
mod token;

pub use gate::{CurrentUser, bearer_token, identify, identify_token};
pub use token::{Claims, TokenIssuer};
