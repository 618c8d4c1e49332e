//! Property-based tests for uniform parameter validation

use pixelsmith_ops::{Operation, OperationKind, OperationParams, OpsError, ResolvedOperation};
use proptest::prelude::*;

proptest! {
    /// Any integer angle resolves and lands in 0..360.
    #[test]
    fn prop_rotate_accepts_any_integer_angle(angle in any::<i32>()) {
        let params = OperationParams::new().with("angle", angle as i64);
        let op = Operation::new(OperationKind::Rotate, params);
        match op.resolve(100, 100).unwrap() {
            ResolvedOperation::Rotate { degrees } => {
                prop_assert!((0..360).contains(&degrees));
                prop_assert_eq!(degrees as i64, (angle as i64).rem_euclid(360));
            }
            other => prop_assert!(false, "unexpected resolution: {:?}", other),
        }
    }

    /// Well-ordered crop bounds always resolve; inverted bounds never do.
    #[test]
    fn prop_crop_bounds_ordering_decides_validity(
        a in 0u32..500,
        b in 0u32..500,
        c in 0u32..500,
        d in 0u32..500,
    ) {
        let params = OperationParams::new()
            .with("left", a)
            .with("right", b)
            .with("top", c)
            .with("bottom", d);
        let op = Operation::new(OperationKind::Crop, params);
        let result = op.resolve(500, 500);

        if a < b && c < d {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(OpsError::InvalidGeometry(_))));
        }
    }

    /// Non-negative strengths always resolve; negative ones never do.
    #[test]
    fn prop_blur_radius_sign_decides_validity(radius in -100.0f64..100.0) {
        let params = OperationParams::new().with("radius", radius);
        let op = Operation::new(OperationKind::Blur, params);
        let result = op.resolve(10, 10);
        if radius >= 0.0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(OpsError::InvalidParameter { name: "radius", .. })), "expected InvalidParameter for radius");
        }
    }

    /// Resize accepts exactly the positive sizes.
    #[test]
    fn prop_resize_requires_positive_dimensions(width in 0u32..64, height in 0u32..64) {
        let params = OperationParams::new()
            .with("width", width)
            .with("height", height);
        let op = Operation::new(OperationKind::Resize, params);
        let result = op.resolve(32, 32);
        if width > 0 && height > 0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(OpsError::InvalidGeometry(_))));
        }
    }
}
