//! # Model building blocks
//!
//! This module aggregates the neural-network building blocks composed by an
//! external model-assembly layer:
//!
//! - `modules`: segmentation heads (`ConvHead`, `SepConvHead`), controller
//!   branches (`SimpleConvController`, `FCController`), and the
//!   `SeparableConv2d` leaf block they build on.
//!
//! The components are re-exported for easy access from the crate root.

pub mod modules;

pub use modules::*;
