//! Configuration enums shared by the building blocks.
//!
//! These closed choice enums are translated into runtime layers by the
//! builders in `models::modules`.

use burn::prelude::*;

/// Defines the activation applied inside a block stage.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Activation {
    /// No activation.
    None,
    /// Rectified linear unit.
    Relu,
    /// Sigmoid linear unit.
    Silu,
    /// Gaussian error linear unit.
    Gelu,
}

/// Defines the normalization applied inside a block stage.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Norm {
    /// No normalization.
    None,
    /// Batch normalization over the channel dimension.
    BatchNorm,
}
