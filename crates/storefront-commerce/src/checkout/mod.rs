//! Checkout module.
//!
//! Contains the order request built from a session and the order returned by
//! the API.

mod order;

pub use order::{Order, OrderLine, OrderProduct, OrderRequest};
