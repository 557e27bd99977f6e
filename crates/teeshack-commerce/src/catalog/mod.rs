//! Product catalog module.
//!
//! The catalog itself is external; this is the shape products take when
//! they are handed to the cart.

mod product;

pub use product::Product;
