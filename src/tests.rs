use crate::error::AdaptisError;
use crate::models::modules::{
    ConvHeadConfig, FCControllerConfig, SepConvHeadConfig, SeparableConv2dConfig,
    SimpleConvControllerConfig,
};

#[test]
fn test_zero_num_outputs_error() {
    let config = ConvHeadConfig::new(0, 64);

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("num_outputs must be nonzero"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_valid_conv_head_configuration() {
    let config = ConvHeadConfig::new(2, 64).with_num_layers(3).with_channels(48);

    assert!(config.validate().is_ok());
}

#[test]
fn test_dropout_ratio_out_of_range() {
    let config = SepConvHeadConfig::new(1, 96, 32).with_dropout_ratio(1.5);

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("dropout_ratio must be in [0, 1)"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_dropout_index_out_of_range() {
    let config = SepConvHeadConfig::new(1, 96, 32)
        .with_num_layers(2)
        .with_dropout_ratio(0.5)
        .with_dropout_index(2); // Invalid: stages are indexed 0 and 1

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("dropout_index must address an existing stage"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_dropout_index_ignored_when_dropout_disabled() {
    // Matches the original behavior: the index is only meaningful when a
    // dropout ratio is set.
    let config = SepConvHeadConfig::new(1, 96, 32)
        .with_num_layers(2)
        .with_dropout_index(5);

    assert!(config.validate().is_ok());
}

#[test]
fn test_separable_conv_zero_kernel_error() {
    let config = SeparableConv2dConfig::new(8, 16, 0, 0);

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("depthwise kernel size and stride must be nonzero"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_simple_conv_controller_zero_latent_error() {
    let config = SimpleConvControllerConfig::new(3, 256, 0);

    assert!(config.validate().is_err());
}

#[test]
fn test_fc_controller_empty_layer_sizes_error() {
    let config = FCControllerConfig::new(512, vec![]);

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("layer_sizes must not be empty"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_fc_controller_zero_width_error() {
    let config = FCControllerConfig::new(512, vec![256, 0, 64]);

    match config.validate() {
        Err(AdaptisError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("layer_sizes entries must be nonzero"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}
