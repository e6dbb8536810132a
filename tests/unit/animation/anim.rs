use super::*;
use crate::animation::timing::{LoopMode, Repeat};

fn twinkle() -> Keyframes<f64> {
    Keyframes::evenly([0.2, 0.9, 0.2], Ease::Linear).unwrap()
}

#[test]
fn evenly_spaces_offsets() {
    let kf = Keyframes::evenly([0.0, 20.0, -10.0, 0.0], Ease::Linear).unwrap();
    let offsets: Vec<f64> = kf.keys.iter().map(|k| k.offset).collect();
    assert_eq!(offsets[0], 0.0);
    assert!((offsets[1] - 1.0 / 3.0).abs() < 1e-12);
    assert!((offsets[2] - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(offsets[3], 1.0);
}

#[test]
fn linear_sampling_hits_keys_and_midpoints() {
    let kf = twinkle();
    assert_eq!(kf.sample(0.0), 0.2);
    assert_eq!(kf.sample(0.5), 0.9);
    assert_eq!(kf.sample(1.0), 0.2);
    assert!((kf.sample(0.25) - 0.55).abs() < 1e-12);
    assert!((kf.sample(0.75) - 0.55).abs() < 1e-12);
}

#[test]
fn sampling_clamps_progress() {
    let kf = twinkle();
    assert_eq!(kf.sample(-1.0), 0.2);
    assert_eq!(kf.sample(2.0), 0.2);
}

#[test]
fn ease_shapes_each_segment() {
    let kf = Keyframes::evenly([0.0, 1.0], Ease::EaseInOut).unwrap();
    assert!(kf.sample(0.1) < 0.1);
    assert!((kf.sample(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn single_key_is_constant() {
    let kf = Keyframes::evenly([0.4], Ease::Linear).unwrap();
    assert_eq!(kf.sample(0.0), 0.4);
    assert_eq!(kf.sample(0.7), 0.4);
}

#[test]
fn validation_rejects_bad_keys() {
    assert!(Keyframes::<f64>::evenly([], Ease::Linear).is_err());
    assert!(Keyframes::evenly([0.0, f64::NAN], Ease::Linear).is_err());

    let unsorted = Keyframes {
        keys: vec![
            Keyframe {
                offset: 0.0,
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                offset: 0.8,
                value: 1.0,
                ease: Ease::Linear,
            },
            Keyframe {
                offset: 0.5,
                value: 2.0,
                ease: Ease::Linear,
            },
            Keyframe {
                offset: 1.0,
                value: 3.0,
                ease: Ease::Linear,
            },
        ],
    };
    assert!(unsorted.validate().is_err());

    let open_ended = Keyframes {
        keys: vec![
            Keyframe {
                offset: 0.0,
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                offset: 0.5,
                value: 1.0,
                ease: Ease::Linear,
            },
        ],
    };
    assert!(open_ended.validate().is_err());
}

#[test]
fn transition_is_pending_then_loops() {
    let tr = Transition::new(twinkle(), LoopTiming::forever(1.0, 2.0).unwrap()).unwrap();
    assert_eq!(tr.sample(0.5), None);
    assert_eq!(tr.sample(1.0), Some(0.2));
    assert_eq!(tr.sample(2.0), Some(0.9));
    assert_eq!(tr.sample(4.0), Some(0.9));
    assert_eq!(tr.sample(1001.0), Some(0.2));
}

#[test]
fn finished_transition_holds_last_value() {
    let timing = LoopTiming {
        delay: 0.0,
        duration: 1.0,
        repeat: Repeat::Count(1),
        mode: LoopMode::Repeat,
    };
    let kf = Keyframes::evenly([0.0, 5.0], Ease::Linear).unwrap();
    let tr = Transition::new(kf, timing).unwrap();
    assert_eq!(tr.sample(0.5), Some(2.5));
    assert_eq!(tr.sample(10.0), Some(5.0));
}
