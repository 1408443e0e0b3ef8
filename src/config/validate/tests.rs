//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::{validate_gan_config, validate_layers, validate_spec};
use crate::config::schema::*;
use crate::gan::GanPolicy;
use crate::nn::{InitSpec, LayerSpec, OutputSpec};

fn linear(inputs: usize, outputs: usize) -> LayerSpec {
    LayerSpec::Linear { inputs, outputs }
}

fn create_valid_spec() -> GanSpec {
    GanSpec {
        gan: GanConfig {
            noise_dim: 4,
            batch_size: 10,
            ..Default::default()
        },
        init: InitSpec::default(),
        generator: NetworkSpec {
            layers: vec![linear(4, 8), LayerSpec::LeakyRelu { alpha: 0.03 }, linear(8, 2)],
            output: None,
        },
        discriminator: NetworkSpec {
            layers: vec![linear(2, 8), LayerSpec::Tanh, linear(8, 1)],
            output: None,
        },
    }
}

#[test]
fn test_valid_spec() {
    let spec = create_valid_spec();
    assert!(validate_spec(&spec).is_ok());
}

#[test]
fn test_invalid_batch_size() {
    let mut spec = create_valid_spec();
    spec.gan.batch_size = 0;
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBatchSize(0)));
}

#[test]
fn test_invalid_noise_dim() {
    let mut spec = create_valid_spec();
    spec.gan.noise_dim = 0;
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidNoiseDim(0)));
}

#[test]
fn test_invalid_generator_update_step() {
    let mut spec = create_valid_spec();
    spec.gan.generator_update_step = 0;
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidGeneratorUpdateStep(0)));
}

#[test]
fn test_invalid_multiplier_and_labels() {
    let mut spec = create_valid_spec();
    spec.gan.multiplier = f64::INFINITY;
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidMultiplier(_)
    ));

    let mut spec = create_valid_spec();
    spec.gan.fake_label = f64::NAN;
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidLabel(_)
    ));
}

#[test]
fn test_policy_loss_pairing() {
    let mut spec = create_valid_spec();
    spec.gan.policy = GanPolicy::Wgan;
    spec.discriminator.output = Some(OutputSpec::SigmoidCrossEntropy);
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::IncompatibleOutput { .. }));
    assert!(err.to_string().contains("wgan"));

    spec.gan.policy = GanPolicy::Standard;
    spec.discriminator.output = Some(OutputSpec::EarthMoverDistance);
    assert!(validate_spec(&spec).is_err());

    spec.discriminator.output = Some(OutputSpec::MeanSquaredError);
    assert!(validate_spec(&spec).is_ok());
}

#[test]
fn test_policy_defaults_pair() {
    for policy in [GanPolicy::Standard, GanPolicy::Dcgan, GanPolicy::Wgan, GanPolicy::WganGp] {
        let mut spec = create_valid_spec();
        spec.gan.policy = policy;
        assert!(validate_spec(&spec).is_ok(), "{policy}");
    }
}

#[test]
fn test_clipping_only_checked_for_wgan() {
    let mut spec = create_valid_spec();
    spec.gan.clipping_parameter = 0.0;
    assert!(validate_spec(&spec).is_ok());

    spec.gan.policy = GanPolicy::Wgan;
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidClipping(_)
    ));
}

#[test]
fn test_lambda_only_checked_for_wgan_gp() {
    let mut spec = create_valid_spec();
    spec.gan.lambda = -1.0;
    spec.gan.policy = GanPolicy::Wgan;
    assert!(validate_spec(&spec).is_ok());

    spec.gan.policy = GanPolicy::WganGp;
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidLambda(_)
    ));
}

#[test]
fn test_invalid_init_std() {
    let mut spec = create_valid_spec();
    spec.init = InitSpec::Gaussian { mean: 0.0, std: 0.0 };
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidInitStd(_)
    ));
}

#[test]
fn test_layer_chain_mismatch() {
    let err = validate_layers("generator", &[linear(4, 8), linear(6, 2)]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::LayerChain {
            network: "generator".to_string(),
            index: 1,
            expected: 6,
            found: 8,
        }
    );
}

#[test]
fn test_empty_linear_layer() {
    let err = validate_layers("discriminator", &[linear(0, 8)]).unwrap_err();
    assert!(matches!(err, ValidationError::EmptyLayer { index: 0, .. }));
}

#[test]
fn test_dropout_ratio() {
    assert!(validate_layers("g", &[LayerSpec::Dropout { ratio: 0.0 }]).is_ok());
    assert!(validate_layers("g", &[LayerSpec::Dropout { ratio: 1.0 }]).is_err());
    assert!(validate_layers("g", &[LayerSpec::Dropout { ratio: -0.1 }]).is_err());
}

#[test]
fn test_leaky_relu_alpha() {
    assert!(validate_layers("d", &[LayerSpec::LeakyRelu { alpha: 0.0 }]).is_ok());
    assert!(matches!(
        validate_layers("d", &[LayerSpec::LeakyRelu { alpha: -0.5 }]).unwrap_err(),
        ValidationError::InvalidLeakyAlpha { index: 0, .. }
    ));
    assert!(validate_layers("d", &[LayerSpec::LeakyRelu { alpha: f64::NAN }]).is_err());

    let mut spec = create_valid_spec();
    spec.generator.layers[1] = LayerSpec::LeakyRelu { alpha: -0.5 };
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidLeakyAlpha { index: 1, .. }
    ));
}

#[test]
fn test_network_without_linear_layer() {
    let mut spec = create_valid_spec();
    spec.discriminator.layers = vec![LayerSpec::Tanh];
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::NoLinearLayer(_)
    ));
}

#[test]
fn test_noise_dim_mismatch() {
    let mut spec = create_valid_spec();
    spec.gan.noise_dim = 5;
    assert_eq!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::NoiseDimMismatch { noise_dim: 5, input: 4 }
    );
}

#[test]
fn test_sample_dim_mismatch() {
    let mut spec = create_valid_spec();
    spec.discriminator.layers[0] = linear(3, 8);
    assert!(matches!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::SampleDimMismatch { generator: 2, discriminator: 3 }
    ));
}

#[test]
fn test_critic_width() {
    let mut spec = create_valid_spec();
    spec.discriminator.layers[2] = linear(8, 2);
    assert_eq!(
        validate_spec(&spec).unwrap_err(),
        ValidationError::InvalidCriticWidth(2)
    );
}

#[test]
fn test_gan_config_standalone() {
    let config = GanConfig::default();
    assert!(validate_gan_config(&config, OutputSpec::SigmoidCrossEntropy).is_ok());
    assert!(validate_gan_config(&config, OutputSpec::EarthMoverDistance).is_err());
}
