use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        BatchNorm, BatchNormConfig, Gelu, PaddingConfig2d, Relu,
    },
    prelude::*,
    tensor::activation::silu,
};

use crate::config::{Activation, Norm};

/// A runtime activation layer selected by [`Activation`].
#[derive(Module, Debug, Clone)]
pub enum ActLayer {
    Relu(Relu),
    Silu(Silu),
    Gelu(Gelu),
}

impl ActLayer {
    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Self::Relu(act) => act.forward(input),
            Self::Silu(act) => act.forward(input),
            Self::Gelu(act) => act.forward(input),
        }
    }
}

#[derive(Module, Debug, Clone)]
pub struct Silu;

impl Silu {
    pub const fn new() -> Self {
        Self {}
    }

    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        silu(input)
    }
}

/// Builds the activation layer for a block stage, if any.
pub fn build_act_layer(activation: &Activation) -> Option<ActLayer> {
    match activation {
        Activation::None => None,
        Activation::Relu => Some(ActLayer::Relu(Relu::new())),
        Activation::Silu => Some(ActLayer::Silu(Silu::new())),
        Activation::Gelu => Some(ActLayer::Gelu(Gelu::new())),
    }
}

/// Builds the normalization layer for a spatial (rank-4) block stage, if any.
pub fn build_norm_2d<B: Backend>(
    norm: &Norm,
    num_features: usize,
    device: &Device<B>,
) -> Option<BatchNorm<B, 2>> {
    match norm {
        Norm::None => None,
        Norm::BatchNorm => Some(BatchNormConfig::new(num_features).init(device)),
    }
}

/// Builds the normalization layer for a feature-vector (rank-2) stage, if any.
pub fn build_norm_1d<B: Backend>(
    norm: &Norm,
    num_features: usize,
    device: &Device<B>,
) -> Option<BatchNorm<B, 0>> {
    match norm {
        Norm::None => None,
        Norm::BatchNorm => Some(BatchNormConfig::new(num_features).init(device)),
    }
}

/// A convolution → activation → normalization stage.
///
/// The activation precedes the normalization, matching the stage ordering
/// used by the heads and the convolutional controller.
#[derive(Config, Debug)]
pub struct ConvNormBlockConfig {
    in_channels: usize,
    out_channels: usize,
    kernel_size: usize,
    #[config(default = "0")]
    padding: usize,
    #[config(default = "Activation::Relu")]
    activation: Activation,
    #[config(default = "Norm::BatchNorm")]
    norm: Norm,
}

impl ConvNormBlockConfig {
    /// Initializes a `ConvNormBlock` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> ConvNormBlock<B> {
        let conv = Conv2dConfig::new(
            [self.in_channels, self.out_channels],
            [self.kernel_size, self.kernel_size],
        )
        .with_padding(PaddingConfig2d::Explicit(self.padding, self.padding))
        .init(device);

        ConvNormBlock {
            conv,
            act: build_act_layer(&self.activation),
            bn: build_norm_2d(&self.norm, self.out_channels, device),
        }
    }
}

#[derive(Module, Debug)]
pub struct ConvNormBlock<B: Backend> {
    conv: Conv2d<B>,
    act: Option<ActLayer>,
    bn: Option<BatchNorm<B, 2>>,
}

impl<B: Backend> ConvNormBlock<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
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

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;

    #[test]
    fn conv_norm_block_maps_channels() {
        let device = Default::default();
        let block = ConvNormBlockConfig::new(8, 16, 3)
            .with_padding(1)
            .init::<NdArray>(&device);

        let x = Tensor::<NdArray, 4>::zeros([2, 8, 16, 16], &device);
        assert_eq!(block.forward(x).dims(), [2, 16, 16, 16]);
    }

    #[test]
    fn valid_padding_shrinks_spatial_size() {
        let device = Default::default();
        let block = ConvNormBlockConfig::new(4, 4, 3).init::<NdArray>(&device);

        let x = Tensor::<NdArray, 4>::zeros([1, 4, 16, 16], &device);
        assert_eq!(block.forward(x).dims(), [1, 4, 14, 14]);
    }
}
