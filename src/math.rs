use num::Float;

/// Triangular membership, similar to skfuzzy's trimf but for a single point.
///
/// A zero-width side collapses onto the peak: `a == b` starts at 1 and only
/// falls, `b == c` only rises.
pub(crate) fn trimf<F: Float>(x: F, [a, b, c]: [F; 3]) -> F {
    if x == b {
        return F::one();
    }
    if x <= a || x >= c {
        return F::zero();
    }

    // Past the guards we have a < x < c and x != b, so the side we land on
    // always has a non-zero width.
    if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);

    (value * factor).round() / factor
}

#[test]
fn test_trimf() {
    let tri = [2., 5., 8.];
    let xs = [0., 2., 3.5, 5., 6.5, 8., 9.];
    let ys: Vec<f64> = xs.iter().map(|x| trimf(*x, tri)).collect();

    assert_eq!(ys, vec![0., 0., 0.5, 1., 0.5, 0., 0.]);
}

#[test]
fn test_trimf_shoulders() {
    // Right triangle: peak sits on the left edge
    let low = [0., 0., 5.];
    assert_eq!(trimf(0., low), 1.);
    assert_eq!(trimf(2.5, low), 0.5);
    assert_eq!(trimf(5., low), 0.);
    assert_eq!(trimf(-1., low), 0.);

    // Left triangle: peak sits on the right edge
    let high = [5., 10., 10.];
    assert_eq!(trimf(10., high), 1.);
    assert_eq!(trimf(7.5, high), 0.5);
    assert_eq!(trimf(5., high), 0.);
    assert_eq!(trimf(11., high), 0.);

    // Spike
    assert_eq!(trimf(3., [3., 3., 3.]), 1.);
    assert_eq!(trimf(3.1, [3., 3., 3.]), 0.);
}

#[test]
fn test_trimf_f32() {
    assert_eq!(trimf(1.5f32, [0., 3., 6.]), 0.5);
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(3.14159, 2), 3.14);
    assert_eq!(round_to(7.25, 1), 7.3);
    assert_eq!(round_to(9.96, 1), 10.);
    assert_eq!(round_to(60., 2), 60.);
}
