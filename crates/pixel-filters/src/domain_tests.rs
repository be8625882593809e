//! Domain-critical regression tests for pixel-filters.
//!
//! Each test pins down one property the command-line pipeline relies on.
//! Unit tests next to each module cover the arithmetic; these cover how the
//! pieces behave together.

#[cfg(test)]
mod domain_tests {
    use crate::adjust::{brighten, contrast, grayscale, saturation};
    use crate::api::{FilterContext, Operation, Tuning};
    use crate::buffer::{BoundaryPolicy, PixelBuffer};
    use crate::color::Rgba;
    use crate::convolve::{edge_detect_base, edge_prefilter};
    use crate::dither::floyd_steinberg_dither;
    use crate::resample::{crop, rotate, scale, GaussianParams, InterpolationMode, Sampler};
    use pretty_assertions::assert_eq;

    fn photo(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| {
            let fx = x as f32 / w as f32;
            let fy = y as f32 / h as f32;
            Rgba::new(fx, fy, (fx * 7.0 + fy * 3.0).sin().abs(), 1.0)
        })
        .unwrap()
    }

    fn run(steps: &[Operation], image: PixelBuffer, seed: u64) -> PixelBuffer {
        let mut ctx = FilterContext::new(Tuning::default(), Some(seed));
        steps
            .iter()
            .try_fold(image, |current, step| step.apply(current, &mut ctx))
            .unwrap()
    }

    // ========================================================================
    // Color adjustments
    // ========================================================================

    /// If this breaks, contrast 1.0 has started rounding samples through the
    /// midpoint formula and no longer returns the input bit for bit.
    #[test]
    fn test_contrast_one_is_bit_exact_identity() {
        let source = photo(17, 11);
        let mut image = source.clone();
        contrast(&mut image, 1.0).unwrap();
        assert_eq!(image.as_raw(), source.as_raw());
    }

    /// If this breaks, saturation and grayscale disagree on luma weights.
    #[test]
    fn test_saturation_zero_equals_grayscale() {
        let mut desaturated = photo(12, 9);
        let mut gray = desaturated.clone();
        saturation(&mut desaturated, 0.0).unwrap();
        grayscale(&mut gray);
        assert_eq!(desaturated, gray);
    }

    /// Brighten by 2: 100/255 becomes 200/255 and 200/255 saturates at 255.
    #[test]
    fn test_brighten_doubles_and_clamps() {
        let mut image =
            PixelBuffer::from_rgba8(2, 1, &[100, 100, 100, 255, 200, 200, 200, 255]).unwrap();
        brighten(&mut image, 2.0).unwrap();
        assert_eq!(image.to_rgba8(), vec![200, 200, 200, 255, 255, 255, 255, 255]);
    }

    /// Every color operation clamps and keeps alpha.
    #[test]
    fn test_color_operations_clamp_and_keep_alpha() {
        let source = PixelBuffer::from_fn(6, 6, |x, y| {
            Rgba::new(x as f32 / 5.0, y as f32 / 5.0, 0.9, 0.4)
        })
        .unwrap();
        for step in [
            Operation::Brighten(3.0),
            Operation::Contrast(4.0),
            Operation::Saturation(3.0),
            Operation::RandomNoise,
            Operation::Sharpen,
            Operation::FloydSteinbergDither(2),
        ] {
            let out = run(&[step], source.clone(), 9);
            for px in out.pixels() {
                for v in [px.r, px.g, px.b] {
                    assert!((0.0..=1.0).contains(&v), "{step} produced {v}");
                }
                assert_eq!(px.a, 0.4, "{step} changed alpha");
            }
        }
    }

    // ========================================================================
    // Dithering and randomness
    // ========================================================================

    /// If this breaks, the error diffusion scan depends on something other
    /// than its input (thread scheduling, uninitialised error rows).
    #[test]
    fn test_floyd_steinberg_is_deterministic() {
        let source = photo(40, 30);
        let mut a = source.clone();
        let mut b = source;
        floyd_steinberg_dither(&mut a, 1).unwrap();
        floyd_steinberg_dither(&mut b, 1).unwrap();
        assert_eq!(a, b);
    }

    /// A seeded run of random dither followed by noise is reproducible, and
    /// a different seed gives a different result.
    #[test]
    fn test_seeded_random_steps_are_reproducible() {
        let steps = [Operation::RandomNoise, Operation::RandomDither(1)];
        let a = run(&steps, photo(16, 16), 42);
        let b = run(&steps, photo(16, 16), 42);
        let c = run(&steps, photo(16, 16), 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// If this breaks, a zero rotation resamples instead of copying and
    /// bilinear or Gaussian modes blur the image.
    #[test]
    fn test_rotate_zero_is_identity_for_all_modes() {
        let source = photo(9, 7);
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Gaussian,
        ] {
            let out = rotate(&source, 0.0, Sampler::new(mode, GaussianParams::default())).unwrap();
            assert_eq!(out, source, "mode {mode}");
        }
    }

    #[test]
    fn test_scale_two_by_one() {
        let out = scale(&photo(100, 50), 2.0, 1.0, Sampler::default()).unwrap();
        assert_eq!(out.dims(), (200, 50));
    }

    /// Crop, then scale by the inverse of the crop ratio, lands back on the
    /// source dimensions (within one pixel of rounding).
    #[test]
    fn test_crop_then_inverse_scale_round_trips_dims() {
        let source = photo(120, 80);
        let cropped = crop(&source, 10, 5, 60, 40).unwrap();
        let restored = scale(&cropped, 120.0 / 60.0, 80.0 / 40.0, Sampler::default()).unwrap();
        assert_eq!(restored.dims(), (120, 80));

        let odd = crop(&source, 0, 0, 37, 23).unwrap();
        let back = scale(&odd, 120.0 / 37.0, 80.0 / 23.0, Sampler::default()).unwrap();
        assert!(back.width().abs_diff(120) <= 1 && back.height().abs_diff(80) <= 1);
    }

    /// The sample mode set by an earlier step is used by later geometry.
    #[test]
    fn test_sample_mode_persists_across_steps() {
        let source = PixelBuffer::from_fn(2, 1, |x, _| Rgba::gray(x as f32)).unwrap();
        let nearest = run(&[Operation::Scale(4.0, 1.0)], source.clone(), 0);
        let bilinear = run(
            &[Operation::Sample(InterpolationMode::Bilinear), Operation::Scale(4.0, 1.0)],
            source,
            0,
        );
        assert!(nearest.pixels().all(|px| px.r == 0.0 || px.r == 1.0));
        assert!(bilinear.pixels().any(|px| px.r > 0.0 && px.r < 1.0));
    }

    /// Steps run in the order given: crop-then-scale and scale-then-crop
    /// produce different images.
    #[test]
    fn test_flag_order_is_preserved() {
        let crop_first = run(
            &[Operation::Crop { x: 0, y: 0, width: 10, height: 10 }, Operation::Scale(2.0, 2.0)],
            photo(30, 30),
            0,
        );
        let scale_first = run(
            &[Operation::Scale(2.0, 2.0), Operation::Crop { x: 0, y: 0, width: 10, height: 10 }],
            photo(30, 30),
            0,
        );
        assert_eq!(crop_first.dims(), (20, 20));
        assert_eq!(scale_first.dims(), (10, 10));
    }

    // ========================================================================
    // Edge detection
    // ========================================================================

    /// If this breaks, the base detector and the full detector have drifted
    /// onto different pre-filters.
    #[test]
    fn test_edge_base_shares_prefilter() {
        let source = photo(14, 10);
        for boundary in [BoundaryPolicy::Clamp, BoundaryPolicy::Zero] {
            assert_eq!(edge_detect_base(&source, boundary), edge_prefilter(&source, boundary));
        }
        let via_pipeline = run(&[Operation::EdgeDetectBase], source.clone(), 0);
        assert_eq!(via_pipeline, edge_prefilter(&source, BoundaryPolicy::Clamp));
    }
}
