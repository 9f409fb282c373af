//! Transform-offset recovery.
//!
//! The sidebar is a virtualized list: entries are absolutely positioned via
//! CSS transforms and their DOM order has nothing to do with what the user
//! sees. The vertical translation component is therefore the only reliable
//! display-order signal, and this module is the single place that parses it.

use once_cell::sync::Lazy;
use regex::Regex;

static MATRIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"matrix\(([^)]*)\)").expect("matrix regex"));

/// Extract the vertical translation of a computed `transform` value.
///
/// Computed styles report transforms as `matrix(a, b, c, d, tx, ty)`; the
/// sixth component is the Y translation. A fresh, unmoved entry reports the
/// degenerate `translateY(0px)` form instead. Anything else (including
/// `none`) yields `None`.
pub fn transform_offset(transform: &str) -> Option<f64> {
    if let Some(caps) = MATRIX_RE.captures(transform) {
        let parts: Vec<&str> = caps[1].split(',').map(str::trim).collect();
        if parts.len() == 6 {
            return parts[5].parse().ok();
        }
        return None;
    }

    if transform.contains("translateY(0px)") {
        return Some(0.0);
    }

    None
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
