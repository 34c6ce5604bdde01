// SPDX: CC0-1.0

use crate::Number;
use core::{fmt, ops::Range};

/// Most coefficients a polynomial may carry (degree 4).
pub const MAX_COEFFS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
        }
    }

    pub fn apply(&self, x: Number) -> Number {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionDescriptor {
    /// Coefficients run from the highest degree down to the constant term.
    Polynomial {
        coeffs: Vec<Number>,
        x: Range<Number>,
    },
    /// `wave(k * x)`
    Sinusoid {
        wave: Wave,
        k: Number,
        x: Range<Number>,
    },
    /// Any other bare token; resolved (or not) at render time.
    Named { name: String, x: Range<Number> },
}

impl FunctionDescriptor {
    pub fn interval(&self) -> &Range<Number> {
        match self {
            Self::Polynomial { x, .. } | Self::Sinusoid { x, .. } | Self::Named { x, .. } => x,
        }
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial { coeffs, x } => {
                write!(f, "polynomial|[")?;
                for (i, c) in coeffs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "]|{}|{}", x.start, x.end)
            }
            Self::Sinusoid { wave, k, x } => {
                write!(f, "{}|[{k}]|{}|{}", wave.name(), x.start, x.end)
            }
            Self::Named { name, x } => write!(f, "{name}|{}|{}", x.start, x.end),
        }
    }
}
