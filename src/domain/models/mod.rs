//! Non-persistent domain types: caller identity, token claims and OAuth2 state.

pub mod auth;
pub mod oauth;
pub mod token;
