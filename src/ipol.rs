use crate::errors::TrajError;

/// Linear interpolation anchored at the lower bracket point:
/// yields exactly y1 at x == x1 and exactly y0 at x == x0.
pub(crate) fn interpolate_linear(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    if dx.abs() <= std::f64::EPSILON {
        return y1;
    }
    y1 - (x1 - x) * (y1 - y0) / dx
}

/// Find the pair of adjacent stations enclosing the measured depth `md`.
/// Returns the (upper, lower) indices into `mds`, which must be strictly
/// increasing and hold at least two values.
///
/// A depth equal to a station depth is valid: interpolating at the returned
/// bracket reproduces that station exactly. Depths strictly below the first
/// station or strictly above the last cannot be enclosed.
pub(crate) fn find_bracket(md: f64, mds: &[f64]) -> Result<(usize, usize), TrajError> {
    let n = mds.len();
    if n < 2 {
        return Err(TrajError::BracketNotFound(md));
    }
    // index of the first station strictly deeper than `md`
    let lower = mds.partition_point(|&v| v <= md);
    if lower == 0 {
        return Err(TrajError::BracketNotFound(md));
    }
    if lower == n {
        if md == mds[n - 1] {
            return Ok((n - 2, n - 1));
        }
        return Err(TrajError::BracketNotFound(md));
    }
    Ok((lower - 1, lower))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interpolate_endpoints_exact() {
        assert_eq!(interpolate_linear(1.0, 1.0, 3.0, 10.0, 30.0), 10.0);
        assert_eq!(interpolate_linear(3.0, 1.0, 3.0, 10.0, 30.0), 30.0);
    }

    #[test]
    fn interpolate_midpoint() {
        assert_eq!(interpolate_linear(2.0, 1.0, 3.0, 10.0, 30.0), 20.0);
    }

    #[test]
    fn bracket_interior() {
        let mds = [0.0, 100.0, 250.0, 400.0];
        assert_eq!(find_bracket(150.0, &mds).unwrap(), (1, 2));
        assert_eq!(find_bracket(50.0, &mds).unwrap(), (0, 1));
    }

    #[test]
    fn bracket_on_station() {
        let mds = [0.0, 100.0, 250.0];
        // a depth on a station brackets against the next interval
        assert_eq!(find_bracket(0.0, &mds).unwrap(), (0, 1));
        assert_eq!(find_bracket(100.0, &mds).unwrap(), (1, 2));
        // except on the last station, where the final interval is reused
        assert_eq!(find_bracket(250.0, &mds).unwrap(), (1, 2));
    }

    #[test]
    fn bracket_out_of_range() {
        let mds = [0.0, 100.0, 250.0];
        assert!(find_bracket(-1.0, &mds).is_err());
        assert!(find_bracket(250.1, &mds).is_err());
        assert!(find_bracket(50.0, &[0.0]).is_err());
    }
}
