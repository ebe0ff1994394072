//! Real roots of quadratic and cubic polynomials.
//!
//! The solvers return every real root in ascending order. Selecting the
//! physically meaningful roots (e.g. compressibility factors larger than
//! the reduced co-volume) is left to the caller.
use crate::{Convergence, SolverOptions};

const MAX_ITER_NEWTON: usize = 5000;
const TOL_NEWTON: f64 = f64::EPSILON;

/// Real roots of `a x² + b x + c = 0`.
///
/// Returns `None` if the polynomial has no real roots. For `a ≈ 0` the
/// single root of the linear equation is returned, a repeated root is
/// returned twice.
pub fn quadratic(a: f64, b: f64, c: f64) -> Option<Vec<f64>> {
    if a.abs() < f64::EPSILON {
        if b.abs() < f64::EPSILON {
            return None;
        }
        return Some(vec![-c / b]);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant.abs() < f64::EPSILON {
        let x = -0.5 * b / a;
        Some(vec![x, x])
    } else if discriminant > 0.0 {
        // avoid cancellation for |b| >> |4ac|
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let (x1, x2) = (q / a, c / q);
        Some(if x1 < x2 { vec![x1, x2] } else { vec![x2, x1] })
    } else {
        None
    }
}

/// Newton iteration for a single real root of `a x³ + b x² + c x + d = 0`
/// starting from `x0`.
///
/// The iteration never fails. If it does not converge within the maximum
/// number of iterations, the last iterate is returned with
/// `converged = false`.
pub fn newton_cubic(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x0: f64,
    options: SolverOptions,
) -> Convergence<f64> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_NEWTON, TOL_NEWTON);
    let mut x = x0;
    for iter in 1..=max_iter {
        let denominator = x * (3.0 * a * x + 2.0 * b) + c;
        if denominator == 0.0 {
            // stationary point
            x = 1.1 * x + 0.1;
            continue;
        }
        let x_new = (x * x * (2.0 * a * x + b) - d) / denominator;
        if !x_new.is_finite() {
            break;
        }
        let dx = x_new - x;
        x = x_new;
        if dx.abs() <= tol * x.abs().max(1.0) {
            return Convergence::new(x, iter, true);
        }
    }
    log_result!(
        verbosity,
        "Cubic root: Newton iteration did not converge within {} step(s)",
        max_iter
    );
    Convergence::new(x, max_iter, false)
}

/// All real roots of `a x³ + b x² + c x + d = 0` in ascending order.
///
/// For `a ≈ 0` the quadratic solver is used, which may return `None`.
/// A proper cubic always has at least one real root.
pub fn cubic(a: f64, b: f64, c: f64, d: f64) -> Option<Vec<f64>> {
    cubic_with_guess(a, b, c, d, 1.0, SolverOptions::default())
}

/// All real roots of a cubic polynomial using `x0` as initial value of the
/// Newton iteration for the first root.
pub fn cubic_with_guess(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x0: f64,
    options: SolverOptions,
) -> Option<Vec<f64>> {
    if a.abs() < f64::EPSILON {
        return quadratic(b, c, d);
    }
    let x = newton_cubic(a, b, c, d, x0, options).value;

    // deflate by the root found
    let b1 = b + a * x;
    let mut roots = quadratic(a, b1, c + x * b1).unwrap_or_default();
    roots.push(x);
    roots.sort_by(|r1, r2| r1.total_cmp(r2));
    Some(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn residual(coefs: [f64; 4], x: f64) -> f64 {
        let [a, b, c, d] = coefs;
        let scale = (a * x.powi(3)).abs() + (b * x * x).abs() + (c * x).abs() + d.abs();
        (((a * x + b) * x + c) * x + d).abs() / scale
    }

    #[test]
    fn three_distinct_roots() {
        let roots = cubic(1.0, -6.0, 11.0, -6.0).unwrap();
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], 1.0, max_relative = 1e-10);
        assert_relative_eq!(roots[1], 2.0, max_relative = 1e-10);
        assert_relative_eq!(roots[2], 3.0, max_relative = 1e-10);
    }

    #[test]
    fn roots_satisfy_polynomial() {
        let cases = [
            [1.0, -6.0, 11.0, -6.0],
            [2.0, -3.0, -11.0, 6.0],
            [1.0, -0.9853, 0.0451, -0.000331],
            [1.0, 0.0, 0.0, -8.0],
            [-3.0, 1.0, 4.0, 0.5],
            [1.0, -1.0, 0.25, -0.015],
        ];
        for coefs in cases {
            let [a, b, c, d] = coefs;
            let roots = cubic(a, b, c, d).unwrap();
            assert!(!roots.is_empty());
            for x in roots {
                assert!(residual(coefs, x) < 1e-6, "{:?}: {}", coefs, x);
            }
        }
    }

    #[test]
    fn single_real_root() {
        // x³ + x + 1 has one real root
        let roots = cubic(1.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], -0.6823278038280193, max_relative = 1e-10);
    }

    #[test]
    fn patel_teja_shape_parameter() {
        let zeta_c: f64 = 0.329032;
        let roots = cubic(
            1.0,
            2.0 - 3.0 * zeta_c,
            3.0 * zeta_c.powi(2),
            -zeta_c.powi(3),
        )
        .unwrap();
        let omega_b: Vec<f64> = roots.into_iter().filter(|&r| r > 0.0 && r < 1.0).collect();
        assert_eq!(omega_b.len(), 1);
        assert_relative_eq!(omega_b[0], 0.085159, max_relative = 1e-4);
    }

    #[test]
    fn degenerate_cubic_is_quadratic() {
        let roots = cubic(0.0, 1.0, -3.0, 2.0).unwrap();
        assert_eq!(roots, vec![1.0, 2.0]);
        assert!(cubic(0.0, 1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn quadratic_cases() {
        assert_eq!(quadratic(0.0, 2.0, -4.0), Some(vec![2.0]));
        assert_eq!(quadratic(1.0, -2.0, 1.0), Some(vec![1.0, 1.0]));
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
        assert!(quadratic(0.0, 0.0, 1.0).is_none());
        let roots = quadratic(1.0, 1e8, 1.0).unwrap();
        assert_relative_eq!(roots[1], -1e-8, max_relative = 1e-10);
    }

    #[test]
    fn newton_reports_iterations() {
        let res = newton_cubic(1.0, -6.0, 11.0, -6.0, 10.0, SolverOptions::default());
        assert!(res.converged);
        assert!(res.iterations > 1);
        assert_relative_eq!(res.value, 3.0, max_relative = 1e-12);

        let res = newton_cubic(
            1.0,
            -6.0,
            11.0,
            -6.0,
            10.0,
            SolverOptions::new().max_iter(2),
        );
        assert!(!res.converged);
        assert_eq!(res.iterations, 2);
    }
}
