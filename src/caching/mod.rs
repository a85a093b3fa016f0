//! Redis-backed short-lived storage.
//!
//! The authorization server keeps authorization codes and refresh tokens here with a
//! TTL, so expiry is enforced by Redis rather than by a sweeper.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # default
//! ```

pub mod redis;
