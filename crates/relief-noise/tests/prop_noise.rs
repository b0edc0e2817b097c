use proptest::prelude::*;
use relief_noise::NoiseField;

fn coord() -> impl Strategy<Value = f64> {
    -1.0e4f64..1.0e4
}

proptest! {
    // Single samples stay inside [-1, 1] up to a small tolerance
    #[test]
    fn sample_is_bounded(seed in any::<u64>(), x in coord(), y in coord(), z in coord()) {
        let n = NoiseField::new(seed);
        let v = n.sample(x, y, z);
        prop_assert!(v.is_finite());
        prop_assert!(v.abs() <= 1.0 + 1e-3, "sample = {}", v);
    }

    // Amplitude normalization keeps multi-octave sums bounded
    #[test]
    fn fractal_is_bounded(
        seed in any::<u64>(),
        x in coord(),
        y in coord(),
        octaves in 1i32..=8,
        persistence in 0.01f64..=1.0,
    ) {
        let n = NoiseField::new(seed);
        let v = n.fractal(x, y, octaves, persistence);
        prop_assert!(v.abs() <= 1.0 + 1e-3, "fractal = {}", v);
    }

    // Two fields from the same seed agree bit for bit
    #[test]
    fn same_seed_same_field(seed in any::<u64>(), x in coord(), y in coord(), z in coord()) {
        let a = NoiseField::new(seed);
        let b = NoiseField::new(seed);
        prop_assert_eq!(a.sample(x, y, z).to_bits(), b.sample(x, y, z).to_bits());
    }
}
