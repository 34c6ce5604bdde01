// SPDX: CC0-1.0

use crate::{config::PlotConfig, Number};
use anyhow::Context;
use chrono::{DateTime, Local};
#[cfg(not(debug_assertions))]
use std::process::Stdio;
use std::{
    fs::OpenOptions,
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
    process::{self, Child},
};

/// Displays a sampled curve.
pub trait Renderer {
    fn show(&mut self, xs: &[Number], ys: &[Number], label: &str) -> anyhow::Result<()>;
}

fn output_filename(now: DateTime<Local>, ext: &str) -> String {
    format!(
        "{}_output-{}.{}",
        env!("CARGO_PKG_NAME"),
        now.format("%Y-%m-%d_%H-%M-%S%.3f"),
        ext
    )
}

/// Writes the samples and a gnuplot script next to each other, then hands
/// the script to a persistent gnuplot process.
#[derive(Debug)]
pub struct Gnuplot {
    output_dir: PathBuf,
    resolution: [u32; 2],
    program: String,
    child: Option<Child>,
}

impl Gnuplot {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            resolution: config.resolution,
            program: config.gnuplot.clone(),
            child: None,
        }
    }
}

impl Renderer for Gnuplot {
    fn show(&mut self, xs: &[Number], ys: &[Number], label: &str) -> anyhow::Result<()> {
        if let Some(old_child) = self.child.take() {
            retire(old_child);
        }

        let now = Local::now();
        let data_path = self.output_dir.join(output_filename(now, "data"));
        let gnuplot_path = self.output_dir.join(output_filename(now, "gnuplot"));
        let svg_path = self.output_dir.join(output_filename(now, "svg"));

        let mut data = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&data_path)
                .context("failed to open output data file")?,
        );
        write_data(&mut data, xs, ys).context("failed to write to output data file")?;
        data.flush()?;
        data.get_mut().sync_data()?;
        drop(data);

        let mut gnuplot = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&gnuplot_path)
                .context("failed to open output gnuplot file")?,
        );
        write_script(&mut gnuplot, &data_path, &svg_path, label, self.resolution)
            .context("failed to write to output gnuplot file")?;
        gnuplot.flush()?;
        gnuplot.get_mut().sync_data()?;
        drop(gnuplot);

        let mut cmd = process::Command::new(&self.program);
        cmd.arg("--persist").arg(&gnuplot_path);
        #[cfg(not(debug_assertions))]
        {
            cmd.stdout(Stdio::null())
                .stderr(Stdio::null())
                .stdin(Stdio::null());
        }
        let child = cmd.spawn().with_context(|| {
            format!(
                "failed to spawn {} (is it installed and in ${{PATH}}?)",
                self.program
            )
        })?;
        tracing::debug!(script = %gnuplot_path.display(), pid = child.id(), "spawned gnuplot");

        self.child = Some(child);
        Ok(())
    }
}

/// Kill a previous gnuplot window. One the user already closed is fine.
fn retire(mut child: Child) {
    let pid = child.id();
    if let Err(err) = child.kill() {
        if err.kind() != ErrorKind::InvalidInput {
            tracing::debug!(pid, error = %err, "failed to kill previous gnuplot child");
        }
    }
    if let Err(err) = child.wait() {
        tracing::debug!(pid, error = %err, "failed to reap previous gnuplot child");
    }
}

pub fn write_data<W: Write>(mut out: W, xs: &[Number], ys: &[Number]) -> std::io::Result<()> {
    for (x, y) in xs.iter().zip(ys) {
        writeln!(out, "{x} {y}")?;
    }
    Ok(())
}

pub fn write_script<W: Write>(
    mut out: W,
    data_path: &Path,
    svg_path: &Path,
    label: &str,
    [width, height]: [u32; 2],
) -> std::io::Result<()> {
    // gnuplot strings are double quoted
    let title = label.replace('"', "'");

    writeln!(out, "reset")?;
    writeln!(out, "set term push")?;
    writeln!(out, "set terminal svg size {width},{height} enhanced")?;
    writeln!(out, "set output '{}'", svg_path.display())?;

    writeln!(out, r#"set title "{title}" noenhanced"#)?;
    writeln!(out, r#"set xlabel "x""#)?;
    writeln!(out, r#"set ylabel "y""#)?;
    writeln!(out, "set grid")?;
    writeln!(out, "set tics out nomirror")?;
    writeln!(out, "unset key")?;

    writeln!(out, "plot '{}' using 1:2 with lines", data_path.display())?;

    // display window
    writeln!(out, "set term pop")?;
    writeln!(out, "replot")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_rows() {
        let mut buf = Vec::new();
        write_data(&mut buf, &[0.0, 0.5, 1.0], &[1.0, 2.25, -3.0]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 1\n0.5 2.25\n1 -3\n");
    }

    #[test]
    fn script_targets_svg_then_window() {
        let mut buf = Vec::new();
        write_script(
            &mut buf,
            Path::new("out.data"),
            Path::new("out.svg"),
            r#"y = "sin"(3x)"#,
            [800, 600],
        )
        .unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("set terminal svg size 800,600 enhanced\n"));
        assert!(script.contains("set output 'out.svg'\n"));
        assert!(script.contains(r#"set title "y = 'sin'(3x)" noenhanced"#));
        assert!(script.contains("plot 'out.data' using 1:2 with lines\n"));
        assert!(script.ends_with("set term pop\nreplot\n"));
    }

    #[test]
    fn retiring_an_exited_child_is_quiet() {
        let mut child = match process::Command::new("true").spawn() {
            Ok(child) => child,
            // no `true` binary to spawn here
            Err(_) => return,
        };
        child.wait().unwrap();
        retire(child);
    }

    #[test]
    fn filenames_share_a_stamp() {
        let now = Local::now();
        let data = output_filename(now, "data");
        let svg = output_filename(now, "svg");
        assert!(data.starts_with("plot_request_output-"));
        assert_eq!(data.trim_end_matches(".data"), svg.trim_end_matches(".svg"));
    }
}
