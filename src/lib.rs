//! Shop services
//!
//! One library behind five binaries:
//!
//! | Binary | Port | Owns |
//! |--------|------|------|
//! | `auth-service` | 9000 | users, OAuth2/OIDC authorization server |
//! | `customer-service` | 8081 | customer profiles |
//! | `product-service` | 8082 | product catalogue |
//! | `order-service` | 8083 | orders |
//! | `admin-server` | 8090 | health dashboard |
//!
//! The auth service signs RS256 access tokens carrying a `userId` claim. The other
//! services fetch its JWK set at startup and verify tokens locally.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← scopes, auth middleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← validation, request/response mapping
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │    Services     │ ──▶ │  HTTP clients   │ ← order -> customer, product
//! └─────────────────┘     └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← data access traits
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```

pub mod caching;
pub mod clients;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
pub mod utils;
