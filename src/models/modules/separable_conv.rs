use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        BatchNorm, PaddingConfig2d,
    },
    prelude::*,
};

use super::utils::{build_act_layer, build_norm_2d, ActLayer};
use crate::{
    config::{Activation, Norm},
    error::{AdaptisError, AdaptisResult},
};

/// Depthwise-separable convolution.
///
/// A depthwise k×k convolution (one filter group per input channel) followed
/// by a pointwise 1×1 convolution, with optional batch normalization and
/// activation applied to the pointwise output.
#[derive(Config, Debug)]
pub struct SeparableConv2dConfig {
    in_channels: usize,
    out_channels: usize,
    dw_kernel: usize,
    dw_padding: usize,
    #[config(default = "1")]
    dw_stride: usize,
    #[config(default = "false")]
    bias: bool,
    #[config(default = "Norm::None")]
    norm: Norm,
    #[config(default = "Activation::None")]
    activation: Activation,
}

impl SeparableConv2dConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> AdaptisResult<()> {
        if self.in_channels == 0 || self.out_channels == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "channel counts must be nonzero".to_owned(),
            });
        }
        if self.dw_kernel == 0 || self.dw_stride == 0 {
            return Err(AdaptisError::InvalidConfiguration {
                reason: "depthwise kernel size and stride must be nonzero".to_owned(),
            });
        }
        Ok(())
    }

    /// Initializes a `SeparableConv2d` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> SeparableConv2d<B> {
        let dw_conv = Conv2dConfig::new(
            [self.in_channels, self.in_channels],
            [self.dw_kernel, self.dw_kernel],
        )
        .with_stride([self.dw_stride, self.dw_stride])
        .with_padding(PaddingConfig2d::Explicit(self.dw_padding, self.dw_padding))
        .with_groups(self.in_channels)
        .with_bias(self.bias)
        .init(device);

        let pw_conv = Conv2dConfig::new([self.in_channels, self.out_channels], [1, 1])
            .with_bias(self.bias)
            .init(device);

        SeparableConv2d {
            dw_conv,
            pw_conv,
            bn: build_norm_2d(&self.norm, self.out_channels, device),
            act: build_act_layer(&self.activation),
        }
    }
}

#[derive(Module, Debug)]
pub struct SeparableConv2d<B: Backend> {
    dw_conv: Conv2d<B>,
    pw_conv: Conv2d<B>,
    bn: Option<BatchNorm<B, 2>>,
    act: Option<ActLayer>,
}

impl<B: Backend> SeparableConv2d<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.dw_conv.forward(x);
        let x = self.pw_conv.forward(x);
        let x = if let Some(bn) = &self.bn {
            bn.forward(x)
        } else {
            x
        };
        if let Some(act) = &self.act {
            act.forward(x)
        } else {
            x
        }
    }
}
