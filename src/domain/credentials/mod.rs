//! Credential entities and resolution contracts

mod credential;
mod resolver;

pub use credential::{scopes, Credentials, StoredToken};
pub use resolver::{AuthorizationFlow, CredentialResolver, CredentialStrategy, TokenStore};

#[cfg(test)]
pub use resolver::mock;
