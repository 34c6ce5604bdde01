// SPDX: CC0-1.0

use crate::Number;

#[derive(Debug)]
pub struct Curve {
    pub name: &'static str,
    pub label: &'static str,
    pub fun: fn(Number) -> Number,
}

impl Curve {
    pub const fn new(name: &'static str, label: &'static str, fun: fn(Number) -> Number) -> Self {
        Self { name, label, fun }
    }
}

pub const NAMED: &[Curve] = &[
    Curve::new("x", "y = x", identity),
    Curve::new("x^2", "y = x^2", square),
    Curve::new("sin(x)", "y = sin(x)", sin),
    Curve::new("cos(x)", "y = cos(x)", cos),
];

/// Substituted for any name missing from [`NAMED`].
pub static FALLBACK: Curve = Curve::new("x", "y = x", identity);

pub fn lookup(name: &str) -> Option<&'static Curve> {
    NAMED.iter().find(|curve| curve.name == name)
}

/// Closest known curve name, if any is similar enough to be worth suggesting.
pub fn similar(name: &str) -> Option<&'static str> {
    NAMED
        .iter()
        .map(|curve| (strsim::normalized_damerau_levenshtein(name, curve.name), curve))
        .reduce(|(acc_sim, acc), (elem_sim, elem)| {
            if elem_sim > acc_sim {
                (elem_sim, elem)
            } else {
                (acc_sim, acc)
            }
        })
        .filter(|(sim, _)| *sim > 0.3)
        .map(|(_, curve)| curve.name)
}

pub fn identity(x: Number) -> Number {
    x
}

pub fn square(x: Number) -> Number {
    x * x
}

pub fn sin(x: Number) -> Number {
    x.sin()
}

pub fn cos(x: Number) -> Number {
    x.cos()
}
