// SPDX: CC0-1.0

pub mod config;
pub mod descriptor;
pub mod eval;
pub mod model;
pub mod parse;
pub mod plot;
pub mod session;
pub mod shell;
pub mod stdlib;

use core::ops::Range;

pub type Number = f64;

/// Evenly spaced samples from `range.start` to `range.end`, both inclusive.
///
/// Descending and zero-width ranges are fine: the samples simply run
/// backwards or all equal `range.start`.
pub fn linspace(range: &Range<Number>, count: usize) -> Vec<Number> {
    match count {
        0 => Vec::new(),
        1 => vec![range.start],
        _ => {
            let last = count - 1;
            let step = (range.end - range.start) / last as Number;
            let mut xs: Vec<Number> = (0..last)
                .map(|i| range.start + step * i as Number)
                .collect();
            // pin the end so rounding never overshoots
            xs.push(range.end);
            xs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(&(-2.0..5.0), 8);
        assert_eq!(xs.len(), 8);
        assert_eq!(xs[0], -2.0);
        assert_eq!(xs[7], 5.0);
        assert!((xs[1] - -1.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_descending() {
        let xs = linspace(&(1.0..-1.0), 3);
        assert_eq!(xs, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn linspace_zero_width() {
        let xs = linspace(&(3.5..3.5), 300);
        assert_eq!(xs.len(), 300);
        assert!(xs.iter().all(|x| *x == 3.5));
    }

    #[test]
    fn linspace_small_counts() {
        assert!(linspace(&(0.0..1.0), 0).is_empty());
        assert_eq!(linspace(&(0.0..1.0), 1), vec![0.0]);
    }
}
