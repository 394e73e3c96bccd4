use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

use meso_core::error::MesoError;
use meso_core::filters::arith::{difference, maximum, scale, weighted_sum};
use meso_core::filters::levels::{albedo_to_brightness, gamma_correct, invert};
use meso_core::filters::normalize::{breakpoint_stretch, clip_unit, normalize};

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn test_normalize_endpoints_are_exact() {
    for &(lower, upper) in &[(-53.5f32, 7.5f32), (0.01, 0.59), (-64.65, -29.25), (90.0, 313.0)] {
        let data = array![[lower, upper]];
        let out = normalize(&data, lower, upper, true).unwrap();
        assert_eq!(out[[0, 0]], 0.0, "lower bound of [{lower}, {upper}]");
        assert_eq!(out[[0, 1]], 1.0, "upper bound of [{lower}, {upper}]");
    }
}

#[test]
fn test_normalize_clipped_output_in_unit_range() {
    let data = Array2::from_shape_fn((16, 16), |(r, c)| (r as f32 - 8.0) * 37.0 + c as f32 * 0.3);
    for &(lower, upper) in &[(-10.0f32, 10.0f32), (-300.0, 300.0), (5.0, 6.0), (10.0, -10.0)] {
        let out = normalize(&data, lower, upper, true).unwrap();
        for &v in out.iter() {
            assert!((0.0..=1.0).contains(&v), "{v} from [{lower}, {upper}]");
        }
    }
}

#[test]
fn test_normalize_without_clip_extrapolates() {
    let data = array![[-10.0f32, 20.0]];
    let out = normalize(&data, 0.0, 10.0, false).unwrap();
    assert_abs_diff_eq!(out[[0, 0]], -1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 1]], 2.0, epsilon = 1e-6);
}

#[test]
fn test_normalize_degenerate_range_rejected() {
    let data = Array2::<f32>::zeros((2, 2));
    let err = normalize(&data, 3.0, 3.0, true).unwrap_err();
    assert!(matches!(err, MesoError::InvalidParameter(_)), "got {err:?}");
}

#[test]
fn test_normalize_non_finite_bounds_rejected() {
    let data = Array2::<f32>::zeros((2, 2));
    assert!(normalize(&data, f32::NAN, 1.0, true).is_err());
    assert!(normalize(&data, 0.0, f32::INFINITY, true).is_err());
}

#[test]
fn test_normalize_keeps_nan() {
    let data = array![[f32::NAN, 5.0]];
    let out = normalize(&data, 0.0, 10.0, true).unwrap();
    assert!(out[[0, 0]].is_nan());
    assert_abs_diff_eq!(out[[0, 1]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_normalize_large_input_matches_small() {
    // Crosses the parallel threshold; values must match the serial path.
    let big = Array2::from_shape_fn((300, 300), |(r, c)| (r * 300 + c) as f32 / 90_000.0);
    let out = normalize(&big, 0.25, 0.75, true).unwrap();
    let small = big.slice(ndarray::s![..4, ..4]).to_owned();
    let small_out = normalize(&small, 0.25, 0.75, true).unwrap();
    for ((r, c), &v) in small_out.indexed_iter() {
        assert_eq!(out[[r, c]], v);
    }
}

// ---------------------------------------------------------------------------
// clip_unit / invert / scale
// ---------------------------------------------------------------------------

#[test]
fn test_clip_unit() {
    let out = clip_unit(&array![[-0.2f32, 0.4, 1.7]]);
    assert_eq!(out, array![[0.0f32, 0.4, 1.0]]);
}

#[test]
fn test_invert() {
    let out = invert(&array![[0.0f32, 0.25, 1.0]]);
    assert_eq!(out, array![[1.0f32, 0.75, 0.0]]);
}

#[test]
fn test_scale_divides() {
    let out = scale(&array![[1.4f32, 0.7]], 1.4);
    assert_abs_diff_eq!(out[[0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 1]], 0.5, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// gamma_correct
// ---------------------------------------------------------------------------

#[test]
fn test_gamma_identity() {
    let data = Array2::from_shape_fn((8, 8), |(r, c)| (r * 8 + c) as f32 / 63.0);
    let out = gamma_correct(&data, 1.0).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_gamma_brightens_midtones() {
    let out = gamma_correct(&array![[0.25f32]], 2.0).unwrap();
    assert_abs_diff_eq!(out[[0, 0]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_gamma_rejects_non_positive() {
    let data = array![[0.5f32]];
    for gamma in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
        let err = gamma_correct(&data, gamma).unwrap_err();
        assert!(matches!(err, MesoError::InvalidParameter(_)), "gamma {gamma}");
    }
}

#[test]
fn test_gamma_keeps_unit_endpoints() {
    let out = gamma_correct(&array![[0.0f32, 1.0]], 0.2587).unwrap();
    assert_eq!(out, array![[0.0f32, 1.0]]);
}

// ---------------------------------------------------------------------------
// arithmetic
// ---------------------------------------------------------------------------

#[test]
fn test_difference() {
    let out = difference(&array![[5.0f32, -2.0]], &array![[3.0f32, 4.0]]).unwrap();
    assert_eq!(out, array![[2.0f32, -6.0]]);
}

#[test]
fn test_difference_shape_mismatch() {
    let err = difference(&Array2::zeros((2, 3)), &Array2::zeros((3, 2))).unwrap_err();
    match err {
        MesoError::ShapeMismatch { expected, found } => {
            assert_eq!(expected, (2, 3));
            assert_eq!(found, (3, 2));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_maximum_propagates_nan() {
    let out = maximum(&array![[0.2f32, f32::NAN, 0.9]], &array![[0.5f32, 0.5, f32::NAN]]).unwrap();
    assert_eq!(out[[0, 0]], 0.5);
    assert!(out[[0, 1]].is_nan());
    assert!(out[[0, 2]].is_nan());
}

#[test]
fn test_weighted_sum_pseudo_green_weights() {
    let out = weighted_sum(
        &array![[1.0f32]],
        &array![[0.5f32]],
        &array![[0.0f32]],
        [0.45, 0.10, 0.45],
    )
    .unwrap();
    assert_abs_diff_eq!(out[[0, 0]], 0.5, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// natural color helpers
// ---------------------------------------------------------------------------

#[test]
fn test_albedo_to_brightness() {
    let out = albedo_to_brightness(&array![[0.0f32, 0.01, 1.0]]);
    assert_abs_diff_eq!(out[[0, 0]], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 1]], 25.5, epsilon = 1e-4);
    assert_abs_diff_eq!(out[[0, 2]], 255.0, epsilon = 1e-3);
}

#[test]
fn test_breakpoint_stretch_segments() {
    // 5 is halfway up the low segment, 132.5 halfway up the high one.
    let out = breakpoint_stretch(&array![[5.0f32, 10.0, 132.5, 300.0]]).unwrap();
    assert_abs_diff_eq!(out[[0, 0]], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 1]], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 2]], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 3]], 1.0, epsilon = 1e-6);
}
