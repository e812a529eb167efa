//! Drive wire client, delegated sessions and tree traversal

mod client;
mod session;
mod walker;

pub use client::{DriveClient, DriveEndpoints};
pub use session::DelegatedSessionFactory;
pub use walker::TreeWalker;
