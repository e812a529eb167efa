//! Credential resolution strategies, chain and token store

mod ambient;
mod chain;
mod installed_flow;
mod oauth;
mod service_account;
mod token_file;
mod token_store;

pub use ambient::AmbientStrategy;
pub use chain::{ChainedCredentialResolver, ChainedCredentialResolverBuilder};
pub use installed_flow::InstalledFlowStrategy;
pub use oauth::{OAuthClient, TokenResponse};
pub use service_account::{ServiceAccountKey, ServiceAccountStrategy};
pub use token_file::TokenFileStrategy;
pub use token_store::FileTokenStore;
