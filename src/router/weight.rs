//! Pattern specificity scoring.
//!
//! The weight orders prefix candidates during resolution. Each extra `/`
//! adds two points, and among patterns with the same number of slashes the
//! one without a trailing slash scores one point higher. `/a/b` is tried
//! before `/ab/`, and both before `/a`.
//!
//! | pattern    | weight |
//! |------------|--------|
//! | `/`        | 0      |
//! | `/a`       | 1      |
//! | `/a/`      | 2      |
//! | `/a/b`     | 3      |
//! | `/a/b/`    | 4      |

/// Compute the specificity weight of a route pattern.
///
/// Only the shape of the pattern matters: the number of `/` characters and
/// whether it ends with one. Callers validate that `pattern` starts with `/`
/// before asking for its weight.
#[inline]
#[must_use]
pub fn weight(pattern: &str) -> usize {
    if pattern == "/" {
        return 0;
    }

    let slashes = pattern.bytes().filter(|&b| b == b'/').count();
    let base = slashes.saturating_sub(1) * 2;

    if pattern.ends_with('/') {
        base
    } else {
        base + 1
    }
}
