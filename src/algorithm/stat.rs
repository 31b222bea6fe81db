//! Small statistical routines.
//!
//! The pipeline needs exactly two pieces of inference: Pearson's r and the
//! Student-t tail probability behind its significance test. Both are small
//! enough to carry directly rather than pulling in a statistics dependency.

/// Pearson product-moment correlation.
///
/// Returns `None` when fewer than two pairs are given or either variable
/// has zero variance; the caller decides how to report that.
#[must_use]
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let count = n as f64;

    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    for (x, y) in pairs {
        sum_x += x;
        sum_y += y;
    }
    let (mean_x, mean_y) = (sum_x / count, sum_y / count);

    let (mut ss_x, mut ss_y, mut ss_xy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_x += dx * dx;
        ss_y += dy * dy;
        ss_xy += dx * dy;
    }
    if ss_x == 0.0 || ss_y == 0.0 {
        return None;
    }

    // Rounding can push |r| a hair past 1 for exact linear relationships.
    Some((ss_xy / (ss_x.sqrt() * ss_y.sqrt())).clamp(-1.0, 1.0))
}

/// t statistic for testing r against zero with n - 2 degrees of freedom.
#[must_use]
pub fn t_statistic(r: f64, n: usize) -> f64 {
    let df = (n - 2) as f64;
    r * (df / (1.0 - r * r)).sqrt()
}

/// Two-sided p-value for a t statistic.
#[must_use]
pub fn two_sided_p(t: f64, df: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    incomplete_beta(df / 2.0, 0.5, df / (df + t * t))
}

/// 95% confidence interval for r via the Fisher z transform.
///
/// Undefined for n <= 3 (the transform's standard error needs n - 3 > 0)
/// and for |r| = 1.
#[must_use]
pub fn fisher_ci95(r: f64, n: usize) -> Option<(f64, f64)> {
    if n <= 3 || r.abs() >= 1.0 {
        return None;
    }
    let z = r.atanh();
    let se = 1.0 / ((n - 3) as f64).sqrt();
    let half_width = 1.959_963_984_540_054 * se;
    Some(((z - half_width).tanh(), (z + half_width).tanh()))
}

/// Regularized incomplete beta function I_x(a, b).
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Continued-fraction expansion of the incomplete beta, Lentz's method.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 200;
    const EPSILON: f64 = 3.0e-14;
    const TINY: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let numerator = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + numerator * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + numerator / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let numerator = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + numerator * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + numerator / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    h
}

/// Lanczos approximation of ln Γ(x) for x > 0.
fn ln_gamma(x: f64) -> f64 {
    const COEFFICIENTS: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let mut denominator = x;
    let mut series = 1.000_000_000_190_015;
    for coefficient in COEFFICIENTS {
        denominator += 1.0;
        series += coefficient / denominator;
    }
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    -tmp + (2.506_628_274_631_000_5 * series / x).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ln_gamma_matches_factorials() {
        // Γ(5) = 24, Γ(1) = 1
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
        assert!(ln_gamma(1.0).abs() < 1e-10);
    }

    #[test]
    fn pearson_exact_linear() {
        let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        let r = pearson(&pairs).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let inverse = [(1.0, -2.0), (2.0, -4.0), (3.0, -6.0)];
        let r = pearson(&inverse).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_degenerate_inputs() {
        assert!(pearson(&[]).is_none());
        assert!(pearson(&[(1.0, 2.0)]).is_none());
        assert!(pearson(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]).is_none());
    }

    #[test]
    fn p_value_matches_t_table() {
        // Two-sided critical value for alpha = 0.05 at 10 degrees of freedom.
        let p = two_sided_p(2.228, 10.0);
        assert!((p - 0.05).abs() < 1e-3, "p = {p}");

        assert!((two_sided_p(0.0, 10.0) - 1.0).abs() < 1e-12);
        assert_eq!(two_sided_p(f64::INFINITY, 10.0), 0.0);
        // Symmetric in the sign of t.
        assert!((two_sided_p(-2.228, 10.0) - two_sided_p(2.228, 10.0)).abs() < 1e-12);
    }

    #[test]
    fn fisher_interval_brackets_r() {
        let (lo, hi) = fisher_ci95(0.5, 30).unwrap();
        assert!(lo < 0.5 && 0.5 < hi);
        assert!((-1.0..=1.0).contains(&lo) && (-1.0..=1.0).contains(&hi));

        assert!(fisher_ci95(0.5, 3).is_none());
        assert!(fisher_ci95(1.0, 30).is_none());
    }
}
