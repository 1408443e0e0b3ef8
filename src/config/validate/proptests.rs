//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use crate::gan::GanPolicy;
use crate::nn::{InitSpec, LayerSpec};
use proptest::prelude::*;

fn arb_policy() -> impl Strategy<Value = GanPolicy> {
    prop_oneof![
        Just(GanPolicy::Standard),
        Just(GanPolicy::Dcgan),
        Just(GanPolicy::Wgan),
        Just(GanPolicy::WganGp),
    ]
}

fn arb_valid_spec() -> impl Strategy<Value = GanSpec> {
    (
        arb_policy(),
        1usize..64,  // noise_dim
        1usize..128, // batch_size
        1usize..8,   // generator_update_step
        1usize..16,  // sample width
        1usize..32,  // hidden width
        0usize..10,  // pre_train_size
    )
        .prop_map(|(policy, noise_dim, batch_size, step, width, hidden, pre_train)| GanSpec {
            gan: GanConfig {
                policy,
                noise_dim,
                batch_size,
                generator_update_step: step,
                pre_train_size: pre_train,
                ..Default::default()
            },
            init: InitSpec::default(),
            generator: NetworkSpec {
                layers: vec![
                    LayerSpec::Linear { inputs: noise_dim, outputs: hidden },
                    LayerSpec::Tanh,
                    LayerSpec::Linear { inputs: hidden, outputs: width },
                ],
                output: None,
            },
            discriminator: NetworkSpec {
                layers: vec![
                    LayerSpec::Linear { inputs: width, outputs: hidden },
                    LayerSpec::Dropout { ratio: 0.25 },
                    LayerSpec::LeakyRelu { alpha: 0.2 },
                    LayerSpec::Linear { inputs: hidden, outputs: 1 },
                ],
                output: None,
            },
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.gan.batch_size = 0;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_broken_join_fails(spec in arb_valid_spec(), extra in 1usize..8) {
        let mut spec = spec;
        let width = spec.generator.output_dim().unwrap_or(1);
        spec.discriminator.layers[0] = LayerSpec::Linear { inputs: width + extra, outputs: 4 };
        spec.discriminator.layers[3] = LayerSpec::Linear { inputs: 4, outputs: 1 };
        let is_sample_mismatch = matches!(
            validate_spec(&spec),
            Err(ValidationError::SampleDimMismatch { .. })
        );
        prop_assert!(is_sample_mismatch);
    }
}
