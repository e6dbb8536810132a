use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn generation_is_deterministic() {
    for kind in ElementKind::ALL {
        assert_eq!(generate(kind, 30), generate(kind, 30));
    }
}

#[test]
fn ids_are_contiguous_and_ordered() {
    for kind in ElementKind::ALL {
        let batch = generate(kind, 17);
        assert_eq!(batch.len(), 17);
        for (i, el) in batch.iter().enumerate() {
            assert_eq!(el.id, i);
            assert_eq!(el.kind, kind);
        }
    }
}

#[test]
fn zero_count_is_empty() {
    assert!(generate(ElementKind::Star, 0).is_empty());
    assert!(generate(ElementKind::Bubble, 0).is_empty());
}

#[test]
fn all_fields_are_bounded() {
    for kind in ElementKind::ALL {
        for el in generate(kind, 500) {
            assert!((0.0..=100.0).contains(&el.position.left));
            if let Some(top) = el.position.top {
                assert!((0.0..=100.0).contains(&top));
            }
            assert!(el.size > 0.0);
            assert!(el.timing.duration > 0.0);
            assert!(el.timing.delay >= 0.0);
            if let Some(o) = el.opacity {
                assert!((0.0..=1.0).contains(&o));
            }
        }
    }
}

#[test]
fn star_reference_values() {
    let stars = generate(ElementKind::Star, 30);

    let s0 = stars[0];
    assert_eq!(s0.position.left, 0.0);
    assert_eq!(s0.position.top, Some(0.0));
    assert_eq!(s0.size, 1.0);
    assert_eq!(s0.timing.delay, 0.0);
    assert_eq!(s0.timing.duration, 2.0);
    assert_eq!(s0.opacity, None);

    let s1 = stars[1];
    assert_eq!(s1.position.left, 37.0);
    assert_eq!(s1.position.top, Some(53.0));
    assert_eq!(s1.size, 2.0);
    assert_close(s1.timing.delay, 0.2);
    assert_eq!(s1.timing.duration, 3.0);
}

#[test]
fn bubble_reference_values() {
    let bubbles = generate(ElementKind::Bubble, 10);

    let b0 = bubbles[0];
    assert_eq!(b0.position.left, 7.0);
    assert_eq!(b0.position.top, None);
    assert_eq!(b0.size, 60.0);
    assert_eq!(b0.timing.delay, 0.0);
    assert_eq!(b0.timing.duration, 8.0);
    assert_close(b0.opacity.unwrap(), 0.08);

    let b9 = bubbles[9];
    assert_eq!(b9.position.left, 24.0);
    assert_eq!(b9.size, 160.0);
    assert_close(b9.timing.delay, 5.4);
    assert_eq!(b9.timing.duration, 16.0);
    assert_close(b9.opacity.unwrap(), 0.11);
}

#[test]
fn large_ids_do_not_overflow() {
    let el = element(ElementKind::Star, usize::MAX);
    assert!((0.0..=100.0).contains(&el.position.left));
}

#[test]
fn prefix_of_larger_batch_matches_smaller_batch() {
    let small = generate(ElementKind::Bubble, 4);
    let large = generate(ElementKind::Bubble, 12);
    assert_eq!(&large[..4], &small[..]);
}

#[test]
fn negative_config_counts_clamp_to_zero() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    assert_eq!(count_from_config(ElementKind::Star, -5), 0);
    assert_eq!(count_from_config(ElementKind::Bubble, 0), 0);
    assert_eq!(count_from_config(ElementKind::Bubble, 10), 10);
}

#[test]
fn oversized_config_counts_clamp_to_max() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    assert_eq!(
        count_from_config(ElementKind::Star, MAX_ELEMENTS as i64),
        MAX_ELEMENTS
    );
    assert_eq!(
        count_from_config(ElementKind::Star, MAX_ELEMENTS as i64 + 1),
        MAX_ELEMENTS
    );
    assert_eq!(count_from_config(ElementKind::Bubble, i64::MAX), MAX_ELEMENTS);
}

#[test]
fn kinds_have_reference_counts_and_names() {
    assert_eq!(ElementKind::Star.default_count(), 30);
    assert_eq!(ElementKind::Bubble.default_count(), 10);
    assert_eq!(ElementKind::Bubble.name(), "bubble");
    assert_eq!(
        serde_json::to_string(&ElementKind::Star).unwrap(),
        "\"star\""
    );
}
