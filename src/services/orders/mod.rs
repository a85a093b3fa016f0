//! Order placement and bookkeeping.
//!
//! Placing an order reads the caller's customer profile and the product from their
//! services, checks stock and prices the order. Stock is checked but not reserved, so
//! two concurrent orders can both pass the check.

pub mod order_service;

pub use order_service::OrderService;
