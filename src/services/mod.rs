//! Business logic layer
//!
//! Services sit between handlers and repositories. Each one takes its dependencies as
//! `Arc<dyn Repository>` / `Arc<dyn Client>` in `new()` and is shared with handlers
//! through `web::Data`.
//!
//! | Module | Used by |
//! |--------|---------|
//! | [`users`], [`auth`] | auth-service (`auth::JwtVerifier` everywhere) |
//! | [`customers`] | customer-service |
//! | [`products`] | product-service |
//! | [`orders`] | order-service |
//! | [`admin`] | admin-server |
//!
//! # Examples
//!
//! ```rust,ignore
//! use shop_services::services::products::ProductService;
//!
//! let product_service = web::Data::new(ProductService::new(product_repo));
//! ```

pub mod admin;
pub mod auth;
pub mod customers;
pub mod orders;
pub mod products;
pub mod users;
