//! Identity provider access and session state.

mod client;
mod session;

pub use client::IdentityClient;
pub use session::{Session, SessionSignal, SessionStore};
