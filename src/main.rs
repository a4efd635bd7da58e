use anyhow::Context;
use biolab_processor::cli::{Args, setup_logging};
use biolab_processor::pipeline::LabProcessor;
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    if let Err(error) = run(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.build_config().context("Invalid configuration")?;
    let processor = LabProcessor::new(config)?.with_progress(args.show_progress());

    processor
        .run(&args.experiment.experiments())
        .context("Processing failed")?;

    Ok(())
}
