//! Catalog module.
//!
//! Contains the read-only resource types fetched from the API: products,
//! their categories, and users.

mod category;
mod product;
mod user;

pub use category::Category;
pub use product::{NewProduct, Product};
pub use user::{NewUser, User};
