// SPDX: CC0-1.0

use crate::{descriptor::FunctionDescriptor, linspace, stdlib, Number};

/// Samples per curve, whatever the interval width.
pub const SAMPLES: usize = 300;

#[derive(Clone, Debug, PartialEq)]
pub struct Sampled {
    pub xs: Vec<Number>,
    pub ys: Vec<Number>,
    pub label: String,
    /// The descriptor named a curve we don't know, so `y = x` was drawn instead.
    pub fallback: bool,
}

/// Evaluate a polynomial whose coefficients run from highest degree down.
pub fn horner(coeffs: &[Number], x: Number) -> Number {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

pub fn render(descriptor: &FunctionDescriptor) -> Sampled {
    let xs = linspace(descriptor.interval(), SAMPLES);
    let mut fallback = false;

    let (ys, label): (Vec<Number>, String) = match descriptor {
        FunctionDescriptor::Polynomial { coeffs, .. } => (
            xs.iter().map(|&x| horner(coeffs, x)).collect(),
            format!("Polynomial {coeffs:?}"),
        ),

        FunctionDescriptor::Sinusoid { wave, k, .. } => (
            xs.iter().map(|&x| wave.apply(k * x)).collect(),
            format!("y = {}({k}x)", wave.name()),
        ),

        FunctionDescriptor::Named { name, .. } => {
            let (curve, label) = match stdlib::lookup(name) {
                Some(curve) => (curve, curve.label.to_string()),
                None => {
                    fallback = true;
                    (
                        &stdlib::FALLBACK,
                        format!(
                            "Unrecognized curve '{name}', plotting {} as fallback",
                            stdlib::FALLBACK.label
                        ),
                    )
                }
            };
            (xs.iter().map(|&x| (curve.fun)(x)).collect(), label)
        }
    };

    Sampled {
        xs,
        ys,
        label,
        fallback,
    }
}
