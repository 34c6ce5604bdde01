// SPDX: CC0-1.0

use crate::{
    descriptor::FunctionDescriptor,
    eval,
    model::{Model, SYSTEM_PROMPT},
    parse::{self, ParseOutcome},
    plot::Renderer,
    shell, stdlib,
};
use std::io::{BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// One interactive plotting session. Collaborators are built once by the
/// caller and owned here for the session's lifetime.
#[derive(Debug)]
pub struct Session<M, R> {
    model: M,
    renderer: R,
}

impl<M: Model, R: Renderer> Session<M, R> {
    pub fn new(model: M, renderer: R) -> Self {
        Self { model, renderer }
    }

    pub fn into_parts(self) -> (M, R) {
        (self.model, self.renderer)
    }

    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, mut out: W) -> anyhow::Result<()> {
        while let Some(line) = shell::input(&mut input, &mut out, "User: ")? {
            let flow = self.step(&line, &mut out)?;
            writeln!(out)?;
            if flow == Flow::Stop {
                break;
            }
        }
        writeln!(out, "Session closed.")?;
        out.flush()?;
        Ok(())
    }

    /// Handle one line of user text. Only output failures are errors; model
    /// and renderer failures are reported and the session carries on.
    pub fn step<W: Write>(&mut self, user_text: &str, mut out: W) -> anyhow::Result<Flow> {
        if user_text.is_empty() {
            return Ok(Flow::Continue);
        }
        if shell::is_help(user_text) {
            shell::help(&mut out)?;
            return Ok(Flow::Continue);
        }
        if shell::is_farewell(user_text) {
            writeln!(out, "User ended the session.")?;
            return Ok(Flow::Stop);
        }

        let reply = match self.model.complete(SYSTEM_PROMPT, user_text) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "model request failed");
                writeln!(out, "model request failed: {err:#}")?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(out, "model output: {reply}")?;

        let outcome = parse::parse(&reply);
        tracing::debug!(?outcome, "parsed model output");

        let descriptor = match outcome {
            ParseOutcome::EndOfSession => {
                writeln!(out, "The model indicated the session has ended.")?;
                return Ok(Flow::Stop);
            }
            ParseOutcome::Unparseable(rejection) => {
                shell::underline(&mut out, &rejection.loc)?;
                writeln!(out, "parse error: {}", rejection.typ)?;
                writeln!(out, "Could not parse the model response. Please try again.")?;
                return Ok(Flow::Continue);
            }
            ParseOutcome::Descriptor(descriptor) => descriptor,
        };
        writeln!(out, "parsed: {descriptor}")?;

        let sampled = eval::render(&descriptor);
        if sampled.fallback {
            if let FunctionDescriptor::Named { ref name, .. } = descriptor {
                if let Some(known) = stdlib::similar(name) {
                    writeln!(out, "note: curve '{known}' has a similar name")?;
                }
            }
        }

        if let Err(err) = self
            .renderer
            .show(&sampled.xs, &sampled.ys, &sampled.label)
        {
            tracing::warn!(error = %format!("{err:#}"), "rendering failed");
            writeln!(out, "rendering failed: {err:#}")?;
        } else {
            writeln!(out, "plotted: {}", sampled.label)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval::SAMPLES, Number};
    use anyhow::bail;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    struct Scripted {
        replies: VecDeque<anyhow::Result<String>>,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(replies: impl IntoIterator<Item = anyhow::Result<String>>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Model for Scripted {
        fn complete(&mut self, system_prompt: &str, user_text: &str) -> anyhow::Result<String> {
            assert_eq!(system_prompt, SYSTEM_PROMPT);
            self.asked.push(user_text.to_string());
            match self.replies.pop_front() {
                Some(reply) => reply,
                None => bail!("no scripted reply left"),
            }
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        shown: Vec<(Vec<Number>, Vec<Number>, String)>,
        fail: bool,
    }

    impl Renderer for Recorder {
        fn show(&mut self, xs: &[Number], ys: &[Number], label: &str) -> anyhow::Result<()> {
            if self.fail {
                bail!("no display");
            }
            self.shown.push((xs.to_vec(), ys.to_vec(), label.to_string()));
            Ok(())
        }
    }

    fn ok(s: &str) -> anyhow::Result<String> {
        Ok(s.to_string())
    }

    fn run(
        model: Scripted,
        renderer: Recorder,
        input: &str,
    ) -> (Scripted, Recorder, String) {
        let mut session = Session::new(model, renderer);
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        let (model, renderer) = session.into_parts();
        (model, renderer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn plots_each_descriptor() {
        let (model, renderer, out) = run(
            Scripted::new([ok("sin|[3]|-10|10"), ok("x^2|-5|5")]),
            Recorder::default(),
            "plot sin(3x) from -10 to 10\nnow x squared on -5..5\n",
        );
        assert_eq!(model.asked.len(), 2);
        assert_eq!(renderer.shown.len(), 2);
        let (xs, ys, label) = &renderer.shown[0];
        assert_eq!(xs.len(), SAMPLES);
        assert_eq!(ys.len(), SAMPLES);
        assert_eq!(label, "y = sin(3x)");
        assert_eq!(renderer.shown[1].2, "y = x^2");
        assert!(out.ends_with("Session closed.\n"));
    }

    #[test]
    fn unparseable_reply_asks_for_retry() {
        let (_, renderer, out) = run(
            Scripted::new([ok("banana"), ok("x|0|1")]),
            Recorder::default(),
            "plot a banana\nplot x\n",
        );
        assert!(out.contains("Could not parse the model response. Please try again."));
        assert_eq!(renderer.shown.len(), 1);
    }

    #[test]
    fn exit_reply_stops() {
        let (model, renderer, out) = run(
            Scripted::new([ok("EXIT"), ok("x|0|1")]),
            Recorder::default(),
            "I think that's all for today\nplot x\n",
        );
        assert_eq!(model.asked.len(), 1);
        assert!(renderer.shown.is_empty());
        assert!(out.contains("The model indicated the session has ended."));
    }

    #[test]
    fn farewell_skips_the_model() {
        let (model, _, out) = run(
            Scripted::new([ok("x|0|1")]),
            Recorder::default(),
            "bye\nplot x\n",
        );
        assert!(model.asked.is_empty());
        assert!(out.contains("User ended the session."));
    }

    #[test]
    fn model_failure_only_aborts_the_line() {
        let (model, renderer, out) = run(
            Scripted::new([Err(anyhow::anyhow!("401 unauthorized")), ok("cos|[]|0|1")]),
            Recorder::default(),
            "plot cos\nplot cos again\n",
        );
        assert_eq!(model.asked.len(), 2);
        assert!(out.contains("model request failed: 401 unauthorized"));
        assert_eq!(renderer.shown.len(), 1);
        assert_eq!(renderer.shown[0].2, "y = cos(1x)");
    }

    #[test]
    fn renderer_failure_is_reported() {
        let (_, _, out) = run(
            Scripted::new([ok("x|0|1")]),
            Recorder {
                fail: true,
                ..Recorder::default()
            },
            "plot x\n",
        );
        assert!(out.contains("rendering failed: no display"));
        assert!(out.ends_with("Session closed.\n"));
    }

    #[test]
    fn unknown_curve_falls_back_with_hint() {
        let (_, renderer, out) = run(
            Scripted::new([ok("sin(x|0|1")]),
            Recorder::default(),
            "plot sine\n",
        );
        assert!(out.contains("note: curve 'sin(x)' has a similar name"));
        let (xs, ys, label) = &renderer.shown[0];
        assert_eq!(xs, ys);
        assert!(label.contains("Unrecognized"));
    }

    #[test]
    fn help_and_blank_lines_stay_local() {
        let (model, _, out) = run(Scripted::default(), Recorder::default(), "\nhelp\n");
        assert!(model.asked.is_empty());
        assert!(out.contains("polynomial|[c0,c1,...,cn]|x_min|x_max"));
    }
}
