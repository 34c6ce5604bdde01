// SPDX: CC0-1.0

//! Parser for the pipe-separated plot encoding produced by the model.
//!
//! ```text
//! polynomial|[c0,c1,...,cn]|x_min|x_max
//! sin|[k]|x_min|x_max
//! cos|[k]|x_min|x_max
//! <name>|x_min|x_max
//! exit
//! ```
//!
//! Parsing is total: every input maps to exactly one [`ParseOutcome`].

use crate::{
    descriptor::{FunctionDescriptor, Wave, MAX_COEFFS},
    Number,
};
use core::{fmt, num::ParseFloatError, ops::Range};
use std::sync::Arc;

pub const DELIM: char = '|';
pub const LIST_DELIM: char = ',';

/// Any normalized text containing this ends the session, wherever it appears.
pub const EXIT: &str = "exit";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubStr {
    src: Arc<String>,
    start: usize,
    len: usize,
}

impl SubStr {
    #[inline]
    pub const fn new(src: Arc<String>, start: usize, len: usize) -> Self {
        Self { src, start, len }
    }

    #[inline]
    pub fn all(src: Arc<String>) -> Self {
        let len = src.len();
        Self::new(src, 0, len)
    }

    pub fn src(&self) -> Arc<String> {
        Arc::clone(&self.src)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self) -> &str {
        &self.src[self.start..self.start + self.len]
    }

    /// Split on `delim`, keeping each piece's position in the source.
    pub fn split(&self, delim: char) -> Vec<SubStr> {
        let mut start = self.start;
        self.get()
            .split(delim)
            .map(|piece| {
                let sub = SubStr::new(Arc::clone(&self.src), start, piece.len());
                start += piece.len() + delim.len_utf8();
                sub
            })
            .collect()
    }
}

impl fmt::Display for SubStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectTyp {
    TooFewFields {
        found: usize,
    },
    FieldCount {
        name: String,
        expected: usize,
        found: usize,
    },
    ParseNum(ParseFloatError),
    TooManyCoeffs {
        found: usize,
    },
}

impl fmt::Display for RejectTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => write!(
                f,
                "expected at least 3 '{DELIM}'-separated fields but found {found}"
            ),
            Self::FieldCount {
                name,
                expected,
                found,
            } => write!(
                f,
                "'{name}' takes exactly {expected} fields but found {found}"
            ),
            Self::ParseNum(err) => write!(f, "invalid number: {err}"),
            Self::TooManyCoeffs { found } => write!(
                f,
                "polynomial takes at most {MAX_COEFFS} coefficients but found {found}"
            ),
        }
    }
}

/// Why a line was unparseable, and which part of the normalized text is at fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub typ: RejectTyp,
    pub loc: SubStr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseOutcome {
    Descriptor(FunctionDescriptor),
    EndOfSession,
    Unparseable(Rejection),
}

/// Trim, lower-case, and drop every whitespace character.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|chr| !chr.is_whitespace())
        .collect()
}

pub fn parse(raw: &str) -> ParseOutcome {
    let text = normalize(raw);
    if text.contains(EXIT) {
        return ParseOutcome::EndOfSession;
    }
    match parse_descriptor(Arc::new(text)) {
        Ok(descriptor) => ParseOutcome::Descriptor(descriptor),
        Err(rejection) => ParseOutcome::Unparseable(rejection),
    }
}

fn parse_descriptor(src: Arc<String>) -> Result<FunctionDescriptor, Rejection> {
    let whole = SubStr::all(Arc::clone(&src));
    let fields = whole.split(DELIM);
    if fields.len() < 3 {
        return Err(Rejection {
            typ: RejectTyp::TooFewFields {
                found: fields.len(),
            },
            loc: whole,
        });
    }

    let expect_fields = |expected: usize| {
        if fields.len() == expected {
            Ok(())
        } else {
            Err(Rejection {
                typ: RejectTyp::FieldCount {
                    name: fields[0].get().to_string(),
                    expected,
                    found: fields.len(),
                },
                loc: whole.clone(),
            })
        }
    };

    match fields[0].get() {
        "polynomial" => {
            expect_fields(4)?;
            let inner = unbracket(&fields[1]);
            let coeffs = if inner.is_empty() {
                Vec::new()
            } else {
                inner
                    .split(LIST_DELIM)
                    .iter()
                    .map(parse_num)
                    .collect::<Result<Vec<Number>, _>>()?
            };
            if coeffs.len() > MAX_COEFFS {
                return Err(Rejection {
                    typ: RejectTyp::TooManyCoeffs {
                        found: coeffs.len(),
                    },
                    loc: fields[1].clone(),
                });
            }
            let x = parse_interval(&fields[2], &fields[3])?;
            Ok(FunctionDescriptor::Polynomial { coeffs, x })
        }

        name @ ("sin" | "cos") => {
            expect_fields(4)?;
            let wave = if name == "sin" { Wave::Sin } else { Wave::Cos };
            let inner = unbracket(&fields[1]);
            let k = if inner.is_empty() {
                1.0
            } else {
                parse_num(&inner)?
            };
            let x = parse_interval(&fields[2], &fields[3])?;
            Ok(FunctionDescriptor::Sinusoid { wave, k, x })
        }

        name => {
            expect_fields(3)?;
            let x = parse_interval(&fields[1], &fields[2])?;
            Ok(FunctionDescriptor::Named {
                name: name.to_string(),
                x,
            })
        }
    }
}

/// Strip any `[` and `]` around a parameter field. The brackets are optional,
/// and an empty result means no parameters were given.
fn unbracket(field: &SubStr) -> SubStr {
    let is_bracket = |chr: char| chr == '[' || chr == ']';
    let text = field.get();
    let rest = text.trim_start_matches(is_bracket);
    let inner = rest.trim_end_matches(is_bracket);
    SubStr::new(field.src(), field.start() + (text.len() - rest.len()), inner.len())
}

fn parse_num(field: &SubStr) -> Result<Number, Rejection> {
    field.get().parse().map_err(|err| Rejection {
        typ: RejectTyp::ParseNum(err),
        loc: field.clone(),
    })
}

fn parse_interval(min: &SubStr, max: &SubStr) -> Result<Range<Number>, Rejection> {
    Ok(parse_num(min)?..parse_num(max)?)
}
