use intentsim_lib::model::field::IntentField;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

prop_compose! {
    fn arb_wave()(
        x in 0usize..6,
        y in 0usize..6,
        z in 0usize..6,
        wavelength in 5.0f64..10.0,
        strength in 0.0f64..2.0
    ) -> ((usize, usize, usize), f64, f64) {
        ((x, y, z), wavelength, strength)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_field_stays_clamped(
        seed in any::<u64>(),
        rate in 0.0f64..1.0,
        probabilistic in any::<bool>(),
        passes in 1usize..20
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = IntentField::generate(6, rate, probabilistic, &mut rng);
        for _ in 0..passes {
            field.fluctuate(rate, probabilistic, &mut rng);
        }
        for &v in &field.cells {
            prop_assert!((-1.0..=1.0).contains(&v), "cell {} out of range", v);
        }
    }

    #[test]
    fn test_waves_and_nudges_stay_clamped(
        start in -1.0f64..=1.0,
        (origin, wavelength, strength) in arb_wave(),
        delta in -5.0f64..5.0
    ) {
        let mut field = IntentField::filled(6, start);
        field.apply_wave(origin, wavelength, strength);
        field.nudge(origin.0, origin.1, origin.2, delta);
        for &v in &field.cells {
            prop_assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_zero_rate_is_identity(seed in any::<u64>(), passes in 1usize..30) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = IntentField::uniform(5, &mut rng);
        let before = field.clone();
        for _ in 0..passes {
            field.fluctuate(0.0, false, &mut rng);
        }
        prop_assert_eq!(field, before);
    }

    #[test]
    fn test_field_entropy_bounded(seed in any::<u64>(), rate in 0.0f64..0.5) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = IntentField::generate(4, rate, true, &mut rng);
        let h = field.binary_entropy();
        prop_assert!((0.0..=1.0 + 1e-12).contains(&h));
    }
}
