// SPDX: CC0-1.0

use anyhow::Context;
use plot_request::{config, model::MistralClient, plot::Gnuplot, session::Session};
use std::{
    io::{stdin, stdout, BufWriter},
    process::ExitCode,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let config = config::load_config().context("failed to load configuration")?;
    let api_key = config
        .model
        .api_key()
        .context("a model API key is required")?;

    let model = MistralClient::new(&config.model, api_key);
    let renderer = Gnuplot::new(&config.plot);
    tracing::debug!(model = %config.model.name, output_dir = %config.plot.output_dir.display(), "session starting");

    let mut session = Session::new(model, renderer);
    session.run(stdin().lock(), BufWriter::new(stdout()))
}
