use super::intervals::Interval;

/// Zero of the straight line through `(t0, v0)` and `(t1, v1)`.
///
/// This is one step of the secant method, used to place a sign change that
/// was only observed between two samples.
pub fn linear_root(t0: f64, v0: f64, t1: f64, v1: f64) -> f64 {
    t0 + (t1 - t0) / (v1 - v0) * (-v0)
}

/// Very primitive way to construct a bracket for future root-finding.
/// Simply doubles the radius until a bracket with opposite signs at the
/// endpoints is found.
pub fn find_root_bracket(
    f: impl Fn(f64) -> f64,
    center: f64,
    mut radius: f64,
    num_iterations: usize,
) -> Option<Interval> {
    for _ in 0..num_iterations {
        let a = center - radius;
        let b = center + radius;

        if f(a) * f(b) < 0.0 {
            return Some(Interval::new(a, b));
        }

        // Double the search radius
        radius *= 2.0;
    }

    None
}

// Adapted from `rtsafe` in http://www.grad.hr/nastava/gs/prg/NumericalRecipesinC.pdf
#[allow(clippy::float_cmp)]
pub fn newton_plus_bisection(
    f_and_f_prime: impl Fn(f64) -> (f64, f64),
    mut interval: Interval,
    num_iterations: usize,
) -> Option<f64> {
    // Initial setup: we guess right in the middle of the interval. Also, we need to
    // determine which way f is oriented.
    let mut guess = interval.midpoint();
    let lo_is_neg = f_and_f_prime(interval.lo()).0 < 0.0;

    for _ in 0..num_iterations {
        let (f, f_prime) = f_and_f_prime(guess);
        if f == 0.0 {
            return Some(guess);
        }

        // Update the bracket
        interval = match (lo_is_neg, f < 0.0) {
            (true, true) => interval.split_right(guess),   // - - +
            (true, false) => interval.split_left(guess),   // - + +
            (false, true) => interval.split_left(guess),   // + - -
            (false, false) => interval.split_right(guess), // + + -
        };

        // If the interval is too small, return
        let midpoint = interval.midpoint();
        if midpoint == interval.lo() || midpoint == interval.hi() {
            return Some(guess);
        }

        // What's our next guess? Let's try one from Newton's method
        let newton_guess = guess - f / f_prime;

        // If it's outside the interval (or on the edge); discard it. It won't help
        // us shrink our search space.
        guess = if interval.contains(newton_guess)
            && newton_guess != interval.lo()
            && newton_guess != interval.hi()
        {
            newton_guess
        } else {
            // If we can't use Newton, use the midpoint
            interval.midpoint()
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_linear_root() {
        assert_relative_eq!(linear_root(0.0, -1.0, 1.0, 1.0), 0.5);
        assert_relative_eq!(linear_root(10.0, -3.0, 11.0, 1.0), 10.75);
        // Orientation doesn't matter
        assert_relative_eq!(linear_root(10.0, 3.0, 11.0, -1.0), 10.75);
        // Exact for linear functions, whatever the bracket
        let f = |t: f64| 2.5 * t - 7.0;
        assert_relative_eq!(
            linear_root(-4.0, f(-4.0), 9.0, f(9.0)),
            2.8,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_bracket() {
        let bracket = find_root_bracket(|x| x - 37.0, 0.0, 1.0, 100).unwrap();
        assert!(bracket.contains(37.0));

        // No sign change anywhere
        assert!(find_root_bracket(|x| x * x + 1.0, 0.0, 1.0, 20).is_none());
    }

    #[test]
    fn test_cubics() {
        // Cube roots, found from a deliberately wide bracket
        for a in [2.0, 50.0, -1.0, 0.1].iter() {
            let root = newton_plus_bisection(
                |x| (x * x * x - a, 3.0 * x * x),
                Interval::new(-100.0, 100.0),
                100,
            )
            .unwrap();
            assert_relative_eq!(root, a.cbrt());
        }

        // There are three roots to x^3 - 4x^2 - 7x + 10: -2, 1, 5
        let f = |x| 10.0 + x * (-7.0 + x * (-4.0 + x));
        let f_ = |x| -7.0 + x * (-8.0 + x * 3.0);
        let solve = |lo, hi| newton_plus_bisection(|x| (f(x), f_(x)), Interval::new(lo, hi), 100);
        assert_relative_eq!(solve(-3.0, 0.0).unwrap(), -2.0);
        assert_relative_eq!(solve(0.0, 4.0).unwrap(), 1.0);
        assert_relative_eq!(solve(4.0, 10.0).unwrap(), 5.0);
    }

    #[test]
    fn test_trig() {
        // There's a unique fixed point cos(x) = x
        let root = newton_plus_bisection(
            |x| (x.cos() - x, -x.sin() - 1.0),
            Interval::new(-1.0, 1.0),
            100,
        )
        .unwrap();
        assert_relative_eq!(root, 0.73908513321516064);
    }

    #[test]
    fn test_gives_up() {
        // Two iterations aren't enough to pin this down
        let root = newton_plus_bisection(
            |x| (x.cos() - x, -x.sin() - 1.0),
            Interval::new(-1.0, 1.0),
            2,
        );
        assert!(root.is_none());
    }
}
