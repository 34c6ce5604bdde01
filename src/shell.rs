// SPDX: CC0-1.0

use crate::parse::SubStr;
use anyhow::Context;
use core::fmt;
use std::io::{self, BufRead, Write};

/// Words that end the session before the model is ever asked.
pub const FAREWELLS: &[&str] = &["bye", "exit", "done", "quit", "stop"];

pub const HELP: &str = "help";

/// Prompt and read one trimmed line, or `None` once input is exhausted.
pub fn input<R: BufRead, W: Write>(
    mut reader: R,
    out: W,
    prompt: impl fmt::Display,
) -> anyhow::Result<Option<String>> {
    fn inner<R: BufRead, W: Write>(
        reader: &mut R,
        mut out: W,
        prompt: impl fmt::Display,
    ) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut s = String::new();
        if reader.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    let s = inner(&mut reader, out, prompt).context("read from standard input failed")?;
    Ok(s)
}

/// Substring match, so "goodbye" and "stop now" both count.
pub fn is_farewell(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    FAREWELLS.iter().any(|word| lower.contains(word))
}

pub fn is_help(user_text: &str) -> bool {
    user_text.trim().eq_ignore_ascii_case(HELP)
}

pub fn underline<W: Write>(mut out: W, span: &SubStr) -> io::Result<()> {
    writeln!(out, "{}", span.src())?;
    writeln!(
        out,
        "{}{}",
        " ".repeat(span.src()[..span.start()].chars().count()),
        "^".repeat(span.get().chars().count().max(1))
    )?;
    Ok(())
}

pub fn help<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "Describe a plot in plain words, e.g. \"plot sin(3x) from -10 to 10\".")?;
    writeln!(out)?;
    writeln!(out, "The model replies with one of:")?;
    writeln!(out, "  polynomial|[c0,c1,...,cn]|x_min|x_max  (highest degree first, at most degree 4)")?;
    writeln!(out, "  sin|[k]|x_min|x_max                    (k defaults to 1)")?;
    writeln!(out, "  cos|[k]|x_min|x_max")?;
    writeln!(out, "  <name>|x_min|x_max                     (x, x^2, sin(x), cos(x))")?;
    writeln!(out, "  exit")?;
    writeln!(out)?;
    writeln!(out, "{HELP}: show this message")?;
    writeln!(out, "{}: end the session", FAREWELLS.join(", "))?;
    Ok(())
}
