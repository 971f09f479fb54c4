use super::*;

fn near_jump(x: f64) -> bool {
    let r = x.rem_euclid(PI);
    r < 1e-9 || PI - r < 1e-9
}

#[test]
fn default_grid_spans_closed_interval() {
    let grid = SampleGrid::default();
    assert_eq!(grid.len(), DEFAULT_SAMPLES);
    assert_eq!(grid.xs()[0], -PI);
    assert_eq!(grid.xs()[DEFAULT_SAMPLES - 1], PI);
    assert!(grid.xs().windows(2).all(|w| w[0] < w[1]));

    let explicit = SampleGrid::linspace(Domain::default(), DEFAULT_SAMPLES).unwrap();
    assert_eq!(explicit, grid);
}

#[test]
fn grid_spacing_is_uniform() {
    let grid = SampleGrid::linspace(Domain::new(0.0, 1.0).unwrap(), 11).unwrap();
    for (i, x) in grid.xs().iter().enumerate() {
        assert!((x - i as f64 * 0.1).abs() < 1e-12);
    }
}

#[test]
fn degenerate_grids_are_rejected() {
    assert!(SampleGrid::linspace(Domain::default(), 0).is_err());
    assert!(SampleGrid::linspace(Domain::default(), 1).is_err());
    let bad = Domain {
        start: 1.0,
        end: -1.0,
    };
    assert!(SampleGrid::linspace(bad, 10).is_err());
}

#[test]
fn reference_values_are_plus_or_minus_one() {
    let grid = SampleGrid::default();
    let ys = reference(grid.xs());
    assert_eq!(ys.len(), grid.len());
    assert!(ys.iter().all(|&y| y == 1.0 || y == -1.0));
    assert!(ys.contains(&1.0));
    assert!(ys.contains(&-1.0));
}

#[test]
fn reference_matches_half_open_convention() {
    assert_eq!(square_wave(0.0), 1.0);
    assert_eq!(square_wave(PI / 2.0), 1.0);
    assert_eq!(square_wave(PI), -1.0);
    assert_eq!(square_wave(-PI), -1.0);
    assert_eq!(square_wave(-PI / 2.0), -1.0);
    assert_eq!(square_wave(f64::NAN), -1.0);
    assert_eq!(square_wave(f64::INFINITY), -1.0);
}

#[test]
fn reference_is_two_pi_periodic() {
    let grid = SampleGrid::default();
    for &x in grid.xs() {
        if near_jump(x) {
            continue;
        }
        assert_eq!(square_wave(x), square_wave(x + TAU), "x = {x}");
        assert_eq!(square_wave(x), square_wave(x - TAU), "x = {x}");
        assert_eq!(square_wave(x), square_wave(x + 3.0 * TAU), "x = {x}");
    }
    // Boundary points agree with each other as well.
    assert_eq!(square_wave(-PI), square_wave(-PI + TAU));
}

#[test]
fn reference_preserves_length_for_any_input() {
    assert!(reference(&[]).is_empty());
    assert_eq!(reference(&[1.0, -1.0, 7.0]), vec![1.0, -1.0, 1.0]);
}

#[test]
fn non_finite_input_maps_to_minus_one() {
    assert_eq!(square_wave(f64::NAN), -1.0);
    assert_eq!(square_wave(f64::INFINITY), -1.0);
    assert_eq!(square_wave(f64::NEG_INFINITY), -1.0);
}

#[test]
fn tiny_negative_input_stays_on_the_low_half() {
    for x in [-1e-16, -1e-17, -1e-300, -f64::MIN_POSITIVE, -5e-324] {
        assert_eq!(square_wave(x), -1.0, "x = {x:e}");
    }
    assert_eq!(square_wave(0.0), 1.0);
    assert_eq!(square_wave(-0.0), 1.0);
}
