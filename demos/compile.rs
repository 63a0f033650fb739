// Copyright (c) 2024 Mike Tsao

//! The `compile` example reads analyzer replies from JSON files, previews each
//! one on a simulated actuator, and exports it as an HE 1.0 document.

use clap::Parser;
use std::path::PathBuf;
use text2vibe::{error::WorkbenchError, prelude::*};
use text2vibe_services::prelude::*;

#[derive(Parser, Debug, Default)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Names of files to process. Each holds one analyzer reply.
    input: Vec<String>,

    /// Directory for exported .he files (overrides the settings file)
    #[clap(short = 'o', long, value_parser)]
    output: Option<PathBuf>,

    /// Settings file to read
    #[clap(short = 's', long, value_parser)]
    settings: Option<PathBuf>,

    /// Wait for each preview to finish before moving on
    #[clap(short = 'p', long, value_parser)]
    play: bool,

    /// Enable debug mode
    #[clap(short = 'd', long, value_parser)]
    debug: bool,
}

/// Treats the "text" as a raw analyzer reply.
struct ReplayAnalyzer;
impl AnalyzesText for ReplayAnalyzer {
    fn analyze(&mut self, text: &str) -> anyhow::Result<VibrationConfig> {
        VibrationConfig::from_analyzer_json(text)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let mut settings = match &args.settings {
        Some(path) => WorkbenchSettings::load(path)?,
        None => WorkbenchSettings::default(),
    };
    if let Some(output) = args.output {
        settings.set_export_directory(output);
    }

    let actuator = ActuatorService::default();
    let mut workbench = Workbench::new_with(
        Box::new(ReplayAnalyzer),
        ActuationSession::new_with(Some(Box::new(actuator.clone()))),
        Box::new(DirectorySink::from_settings(&settings)),
        settings,
    );

    for input_filename in args.input {
        let reply = match std::fs::read_to_string(&input_filename) {
            Ok(reply) => reply,
            Err(e) => {
                eprintln!("error while opening {input_filename}: {e:?}");
                continue;
            }
        };
        if let Err(e) = workbench.analyze(&reply) {
            eprintln!("error while analyzing {input_filename}: {e}");
            continue;
        }
        if let Some(config) = workbench.config() {
            eprintln!(
                "{input_filename}: {} effect '{}' ({})",
                config.vibration_type(),
                config.effect(),
                config.reasoning()
            );
            let train = compile_pulse_train(config);
            eprintln!("  pulse train {:?} ({}ms)", train.pattern(), train.total());
        }
        match workbench.export() {
            Ok(Some(name)) => eprintln!("  exported {name}"),
            Ok(None) => {}
            Err(e @ WorkbenchError::Compile(_)) => eprintln!("  not exported: {e}"),
            Err(e) => return Err(e.into()),
        }
        if args.debug {
            if let Some(log) = workbench.debug_log() {
                println!("{log}");
            }
        }
        if args.play {
            while let Ok(event) = actuator.receiver().recv() {
                if matches!(
                    event,
                    ActuatorServiceEvent::Finished | ActuatorServiceEvent::Quit
                ) {
                    break;
                }
            }
        }
    }

    actuator.send_input(ActuatorServiceInput::Quit);
    Ok(())
}
