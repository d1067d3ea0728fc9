use burn::{
    nn::{BatchNorm, Linear, LinearConfig},
    prelude::*,
};

use super::utils::{build_act_layer, build_norm_1d, ActLayer, ConvNormBlock, ConvNormBlockConfig};
use crate::{
    config::{Activation, Norm},
    error::{AdaptisError, AdaptisResult},
};

/// A lightweight convolutional controller branch.
///
/// Stacks `num_layers` conv → activation → norm stages at a fixed
/// `latent_size` channel width. Produces a spatial map.
#[derive(Config, Debug)]
pub struct SimpleConvControllerConfig {
    num_layers: usize,
    in_channels: usize,
    latent_size: usize,
    #[config(default = "1")]
    kernel_size: usize,
    #[config(default = "Activation::Relu")]
    activation: Activation,
    #[config(default = "Norm::BatchNorm")]
    norm: Norm,
}

impl SimpleConvControllerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> AdaptisResult<()> {
        if self.in_channels == 0 || self.latent_size == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "channel counts must be nonzero".to_owned(),
            });
        }
        Ok(())
    }

    /// Initializes a `SimpleConvController` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> SimpleConvController<B> {
        let blocks = (0..self.num_layers)
            .map(|i| {
                let in_channels = if i == 0 { self.in_channels } else { self.latent_size };
                ConvNormBlockConfig::new(in_channels, self.latent_size, self.kernel_size)
                    .with_activation(self.activation.clone())
                    .with_norm(self.norm.clone())
                    .init(device)
            })
            .collect::<Vec<_>>();

        SimpleConvController { blocks }
    }
}

#[derive(Module, Debug)]
pub struct SimpleConvController<B: Backend> {
    blocks: Vec<ConvNormBlock<B>>,
}

impl<B: Backend> SimpleConvController<B> {
    /// Whether this controller produces a spatial map.
    pub const fn returns_map(&self) -> bool {
        true
    }

    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut x = x;
        for block in &self.blocks {
            x = block.forward(x);
        }
        x
    }
}

/// A fully-connected controller branch.
///
/// Applies one dense → activation → norm triple per entry of `layer_sizes`.
/// Produces a feature vector rather than a spatial map.
#[derive(Config, Debug)]
pub struct FCControllerConfig {
    in_features: usize,
    layer_sizes: Vec<usize>,
    #[config(default = "Activation::Relu")]
    activation: Activation,
    #[config(default = "Norm::BatchNorm")]
    norm: Norm,
}

impl FCControllerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> AdaptisResult<()> {
        if self.in_features == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "in_features must be nonzero".to_owned(),
            });
        }
        if self.layer_sizes.is_empty() {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "layer_sizes must not be empty".to_owned(),
            });
        }
        if self.layer_sizes.contains(&0) {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "layer_sizes entries must be nonzero".to_owned(),
            });
        }
        Ok(())
    }

    /// Initializes an `FCController` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> FCController<B> {
        let mut in_features = self.in_features;
        let blocks = self
            .layer_sizes
            .iter()
            .map(|&units| {
                let block = DenseBlock {
                    linear: LinearConfig::new(in_features, units).init(device),
                    act: build_act_layer(&self.activation),
                    bn: build_norm_1d(&self.norm, units, device),
                };
                in_features = units;
                block
            })
            .collect::<Vec<_>>();

        FCController { blocks }
    }
}

#[derive(Module, Debug)]
pub struct FCController<B: Backend> {
    blocks: Vec<DenseBlock<B>>,
}

impl<B: Backend> FCController<B> {
    /// Whether this controller produces a spatial map.
    pub const fn returns_map(&self) -> bool {
        false
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = x;
        for block in &self.blocks {
            x = block.forward(x);
        }
        x
    }
}

#[derive(Module, Debug)]
struct DenseBlock<B: Backend> {
    linear: Linear<B>,
    act: Option<ActLayer>,
    bn: Option<BatchNorm<B, 0>>,
}

impl<B: Backend> DenseBlock<B> {
    fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.linear.forward(x);
        let x = if let Some(act) = &self.act {
            act.forward(x)
        } else {
            x
        };
        if let Some(bn) = &self.bn {
            bn.forward(x)
        } else {
            x
        }
    }
}
