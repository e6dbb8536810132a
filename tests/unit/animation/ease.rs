use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::EaseInOut,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn ease_in_out_is_symmetric_and_smooth() {
    for i in 1..20 {
        let t = f64::from(i) / 20.0;
        let a = Ease::EaseInOut.apply(t);
        let b = Ease::EaseInOut.apply(1.0 - t);
        assert!((a + b - 1.0).abs() < 1e-5, "t={t} a={a} b={b}");
    }
    assert!((Ease::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
    // Slow near the ends, fast in the middle.
    assert!(Ease::EaseInOut.apply(0.1) < 0.1);
    assert!(Ease::EaseInOut.apply(0.9) > 0.9);
}

#[test]
fn linear_bezier_matches_identity() {
    let ease = Ease::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        assert!((ease.apply(t) - t).abs() < 1e-6);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::EaseInOut.apply(-3.0), 0.0);
    assert_eq!(Ease::InCubic.apply(7.0), 1.0);
}

#[test]
fn bezier_validation_rejects_out_of_range_x() {
    let bad = Ease::CubicBezier {
        x1: 1.5,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };
    assert!(!bad.is_valid());
    assert!(Ease::EaseInOut.is_valid());
}

#[test]
fn css_names() {
    assert_eq!(Ease::Linear.css(), "linear");
    assert_eq!(Ease::EaseInOut.css(), "ease-in-out");
    assert_eq!(Ease::InOutQuad.css(), "cubic-bezier(0.45, 0, 0.55, 1)");
}
