use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        Dropout, DropoutConfig, PaddingConfig2d,
    },
    prelude::*,
};

use super::{
    separable_conv::{SeparableConv2d, SeparableConv2dConfig},
    utils::{ConvNormBlock, ConvNormBlockConfig},
};
use crate::{
    config::{Activation, Norm},
    error::{AdaptisError, AdaptisResult},
};

/// A convolutional segmentation head.
///
/// Stacks `num_layers` conv → ReLU → norm stages at a fixed `channels` width,
/// then projects to `num_outputs` channels with a 1×1 convolution.
#[derive(Config, Debug)]
pub struct ConvHeadConfig {
    num_outputs: usize,
    in_channels: usize,
    #[config(default = "32")]
    channels: usize,
    #[config(default = "1")]
    num_layers: usize,
    #[config(default = "3")]
    kernel_size: usize,
    #[config(default = "1")]
    padding: usize,
    #[config(default = "Norm::BatchNorm")]
    norm: Norm,
}

impl ConvHeadConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> AdaptisResult<()> {
        if self.num_outputs == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "num_outputs must be nonzero".to_owned(),
            });
        }
        if self.in_channels == 0 || self.channels == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "channel counts must be nonzero".to_owned(),
            });
        }
        Ok(())
    }

    /// Initializes a `ConvHead` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> ConvHead<B> {
        let blocks = (0..self.num_layers)
            .map(|i| {
                let in_channels = if i == 0 { self.in_channels } else { self.channels };
                ConvNormBlockConfig::new(in_channels, self.channels, self.kernel_size)
                    .with_padding(self.padding)
                    .with_activation(Activation::Relu)
                    .with_norm(self.norm.clone())
                    .init(device)
            })
            .collect::<Vec<_>>();

        let out_in_channels = if self.num_layers == 0 {
            self.in_channels
        } else {
            self.channels
        };
        let conv_out = Conv2dConfig::new([out_in_channels, self.num_outputs], [1, 1])
            .with_padding(PaddingConfig2d::Valid)
            .init(device);

        ConvHead { blocks, conv_out }
    }
}

#[derive(Module, Debug)]
pub struct ConvHead<B: Backend> {
    blocks: Vec<ConvNormBlock<B>>,
    conv_out: Conv2d<B>,
}

impl<B: Backend> ConvHead<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut x = x;
        for block in &self.blocks {
            x = block.forward(x);
        }
        self.conv_out.forward(x)
    }
}

/// A separable-convolution segmentation head.
///
/// Like [`ConvHead`] but each stage is a ReLU-activated, normalized
/// [`SeparableConv2d`], with an optional dropout inserted after the stage at
/// `dropout_index`, then a final 1×1 convolution to `num_outputs` channels.
#[derive(Config, Debug)]
pub struct SepConvHeadConfig {
    num_outputs: usize,
    in_channels: usize,
    channels: usize,
    #[config(default = "1")]
    num_layers: usize,
    #[config(default = "3")]
    kernel_size: usize,
    #[config(default = "1")]
    padding: usize,
    #[config(default = "0.0")]
    dropout_ratio: f64,
    #[config(default = "0")]
    dropout_index: usize,
    #[config(default = "Norm::BatchNorm")]
    norm: Norm,
}

impl SepConvHeadConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> AdaptisResult<()> {
        if self.num_outputs == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "num_outputs must be nonzero".to_owned(),
            });
        }
        if self.in_channels == 0 || self.channels == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "channel counts must be nonzero".to_owned(),
            });
        }
        if !(0.0..1.0).contains(&self.dropout_ratio) {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "dropout_ratio must be in [0, 1)".to_owned(),
            });
        }
        if self.dropout_ratio > 0.0 && self.dropout_index >= self.num_layers {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "dropout_index must address an existing stage".to_owned(),
            });
        }
        Ok(())
    }

    /// Initializes a `SepConvHead` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> SepConvHead<B> {
        let blocks = (0..self.num_layers)
            .map(|i| {
                let in_channels = if i == 0 { self.in_channels } else { self.channels };
                SeparableConv2dConfig::new(
                    in_channels,
                    self.channels,
                    self.kernel_size,
                    self.padding,
                )
                .with_norm(self.norm.clone())
                .with_activation(Activation::Relu)
                .init(device)
            })
            .collect::<Vec<_>>();

        let dropout = if self.dropout_ratio > 0.0 {
            Some(DropoutConfig::new(self.dropout_ratio).init())
        } else {
            None
        };

        let out_in_channels = if self.num_layers == 0 {
            self.in_channels
        } else {
            self.channels
        };
        let conv_out = Conv2dConfig::new([out_in_channels, self.num_outputs], [1, 1])
            .with_padding(PaddingConfig2d::Valid)
            .init(device);

        SepConvHead {
            blocks,
            dropout,
            dropout_index: self.dropout_index,
            conv_out,
        }
    }
}

#[derive(Module, Debug)]
pub struct SepConvHead<B: Backend> {
    blocks: Vec<SeparableConv2d<B>>,
    dropout: Option<Dropout>,
    dropout_index: usize,
    conv_out: Conv2d<B>,
}

impl<B: Backend> SepConvHead<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut x = x;
        for (i, block) in self.blocks.iter().enumerate() {
            x = block.forward(x);
            if i == self.dropout_index {
                if let Some(dropout) = &self.dropout {
                    x = dropout.forward(x);
                }
            }
        }
        self.conv_out.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;

    #[test]
    fn conv_head_projects_to_num_outputs() {
        let device = Default::default();
        let head = ConvHeadConfig::new(5, 64)
            .with_num_layers(2)
            .init::<NdArray>(&device);

        let x = Tensor::<NdArray, 4>::zeros([2, 64, 24, 24], &device);
        assert_eq!(head.forward(x).dims(), [2, 5, 24, 24]);
    }

    #[test]
    fn conv_head_without_stages_is_a_projection() {
        let device = Default::default();
        let head = ConvHeadConfig::new(3, 16)
            .with_num_layers(0)
            .init::<NdArray>(&device);

        let x = Tensor::<NdArray, 4>::zeros([1, 16, 8, 8], &device);
        assert_eq!(head.forward(x).dims(), [1, 3, 8, 8]);
    }

    #[test]
    fn sep_conv_head_projects_to_num_outputs() {
        let device = Default::default();
        let head = SepConvHeadConfig::new(1, 96, 32)
            .with_num_layers(2)
            .with_dropout_ratio(0.1)
            .with_dropout_index(1)
            .init::<NdArray>(&device);

        let x = Tensor::<NdArray, 4>::zeros([2, 96, 24, 24], &device);
        assert_eq!(head.forward(x).dims(), [2, 1, 24, 24]);
    }
}
