//! Building blocks of the AdaptIS instance segmentation model, on Burn.
//!
//! Each block is constructed once from a `*Config` with fixed
//! hyperparameters and then invoked per forward pass; the ordered layer
//! stack is fixed after construction. Composition into a full model happens
//! outside this crate.

mod config;
mod error;
mod models;
#[cfg(test)]
mod tests;

pub use config::*;
pub use error::{AdaptisError, AdaptisResult};
pub use models::*;
