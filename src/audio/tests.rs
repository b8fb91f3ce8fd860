use std::time::Duration;

use super::rodio_sink::seek_target;

#[test]
fn seek_target_clamps_to_the_known_length() {
    let total = Some(Duration::from_secs(180));
    assert_eq!(seek_target(12.5, total), Some(Duration::from_millis(12_500)));
    assert_eq!(seek_target(-3.0, total), Some(Duration::ZERO));
    assert_eq!(seek_target(600.0, total), Some(Duration::from_secs(180)));
}

#[test]
fn seek_target_survives_values_too_large_for_a_duration() {
    let total = Some(Duration::from_secs(180));
    assert_eq!(seek_target(1e30, total), Some(Duration::from_secs(180)));
    assert_eq!(seek_target(f64::INFINITY, total), Some(Duration::from_secs(180)));
    assert_eq!(seek_target(1e30, None), Some(Duration::MAX));
}

#[test]
fn seek_target_ignores_nan() {
    assert_eq!(seek_target(f64::NAN, Some(Duration::from_secs(1))), None);
    assert_eq!(seek_target(f64::NAN, None), None);
}
