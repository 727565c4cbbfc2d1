use super::*;
use crate::wheel::geometry::segment_under_pointer;

#[test]
fn default_plan_shape() {
    let p = plan(4, 0, 40, 10).unwrap();
    assert_eq!(p.frames().len(), 41);
    assert_eq!(p.hold_frames(), 10);
    assert_eq!(p.len(), 51);
    assert!(!p.is_empty());
    assert_eq!(p.iter().count(), p.len());
}

#[test]
fn last_spin_frame_is_exactly_terminal() {
    for n in 1..=12usize {
        for k in 0..n {
            let p = plan(n, k, 40, 3).unwrap();
            assert_eq!(p.frames()[40], p.terminal_angle());
            assert_eq!(p.angle_at(40), Some(p.terminal_angle()));
            assert_eq!(p.angle_at(43), Some(p.terminal_angle()));
            assert_eq!(p.angle_at(44), None);
        }
    }
}

#[test]
fn first_frame_carries_the_full_spin() {
    let p = plan(6, 2, 40, 0).unwrap();
    let first = p.frames()[0];
    assert!(first >= p.terminal_angle());
    assert!(first <= p.terminal_angle() + p.total_rotation());
    assert!((first - p.total_rotation()).abs() < 1e-9);
    assert!(p.total_rotation() - p.terminal_angle() >= 2.0 * TAU - 1e-9);
}

#[test]
fn distance_to_terminal_never_increases() {
    for ease in [Ease::Linear, Ease::OutQuad, Ease::OutCubic] {
        let opts = ScheduleOpts {
            ease,
            frame_count: 60,
            ..ScheduleOpts::default()
        };
        let p = plan_with(&opts, 7, 3).unwrap();
        let t = p.terminal_angle();
        let mut prev = f64::INFINITY;
        for a in p.iter() {
            let d = (a - t).abs();
            assert!(d <= prev, "{ease:?}: {d} > {prev}");
            assert!(a >= t, "overshot: {a} < {t}");
            prev = d;
        }
    }
}

#[test]
fn center_landing_puts_terminal_segment_under_pointer() {
    for n in 1..=24usize {
        let s = segment_span(n);
        for k in 0..n {
            let theta = terminal_angle(n, k, Landing::Center).unwrap();
            assert!((0.0..TAU).contains(&theta));
            assert_eq!(segment_under_pointer(n, theta), k, "n={n} k={k}");
            // Exactly mid-segment.
            let local = (-theta).rem_euclid(TAU);
            assert!((local - (k as f64 + 0.5) * s).abs() < 1e-9);
        }
    }
}

#[test]
fn jitter_landing_stays_inside_the_segment() {
    for n in 1..=16usize {
        let s = segment_span(n);
        for k in 0..n {
            for seed in 0..32u64 {
                let theta = terminal_angle(n, k, Landing::Jitter { seed }).unwrap();
                assert_eq!(segment_under_pointer(n, theta), k);
                let local = (-theta).rem_euclid(TAU);
                let from_center = (local - (k as f64 + 0.5) * s).abs();
                assert!(from_center < s / 2.0, "n={n} k={k} seed={seed}");
            }
        }
    }
}

#[test]
fn jitter_is_seed_deterministic() {
    let a = terminal_angle(8, 0, Landing::Jitter { seed: 42 }).unwrap();
    let b = terminal_angle(8, 0, Landing::Jitter { seed: 42 }).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_segment_plan_is_finite() {
    let p = plan(1, 0, 40, 10).unwrap();
    assert!(p.iter().all(f64::is_finite));
    assert_eq!(p.terminal_angle(), std::f64::consts::PI);
}

#[test]
fn zero_frame_count_settles_immediately() {
    let p = plan(3, 1, 0, 2).unwrap();
    assert_eq!(p.frames(), &[p.terminal_angle()]);
    assert_eq!(p.len(), 3);
}

#[test]
fn rejects_bad_inputs() {
    assert!(matches!(plan(0, 0, 40, 10), Err(WheelError::EmptyInput)));
    assert!(matches!(
        plan(4, 4, 40, 10),
        Err(WheelError::InvalidSelection { index: 4, len: 4 })
    ));
    let opts = ScheduleOpts {
        full_rotations: 1,
        ..ScheduleOpts::default()
    };
    assert!(matches!(
        plan_with(&opts, 4, 0),
        Err(WheelError::Validation(_))
    ));
}

#[test]
fn landing_deserializes_from_json() {
    let c: Landing = serde_json::from_str("\"center\"").unwrap();
    assert_eq!(c, Landing::Center);
    let j: Landing = serde_json::from_str(r#"{"jitter":{"seed":7}}"#).unwrap();
    assert_eq!(j, Landing::Jitter { seed: 7 });
}
