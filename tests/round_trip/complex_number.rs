//! Complex number round trips

use crate::common::{assert_consistent, through_file};
use proptest::prelude::*;
use std::f64::consts::PI;
use surrogate::{encode, ComplexNumber};

#[test]
fn one_survives_exactly() {
    let back = through_file(&ComplexNumber::from_coordinates(1.0, 0.0));
    assert_eq!(back.real(), 1.0);
    assert_eq!(back.imaginary(), 0.0);
    assert_eq!(back.magnitude(), 1.0);
    assert_eq!(back.angle(), 0.0);
}

#[test]
fn origin_survives() {
    let back = through_file(&ComplexNumber::from_coordinates(0.0, 0.0));
    assert_eq!(back.magnitude(), 0.0);
    assert_eq!(back.angle(), 0.0f64.atan2(0.0));
}

#[test]
fn polar_and_coordinate_forms_share_bytes() {
    let a = ComplexNumber::from_polar(1.0, 0.0);
    let b = ComplexNumber::from_coordinates(1.0, 0.0);
    assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn coordinates_round_trip(real in -10.0f64..=10.0, imaginary in -10.0f64..=10.0) {
        let back = through_file(&ComplexNumber::from_coordinates(real, imaginary));
        prop_assert_eq!(back.real().to_bits(), real.to_bits());
        prop_assert_eq!(back.imaginary().to_bits(), imaginary.to_bits());
        assert_consistent(&back);
    }

    #[test]
    fn polar_round_trip(magnitude in 0.0f64..100.0, angle in -PI..PI) {
        let original = ComplexNumber::from_polar(magnitude, angle);
        let back = through_file(&original);
        prop_assert_eq!(back.real(), original.real());
        prop_assert_eq!(back.imaginary(), original.imaginary());
        assert_consistent(&back);
    }
}
