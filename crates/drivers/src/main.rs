mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use config::AppConfig;
use log::debug;
use lite_upscale_adapters::{
    present_materialized, present_output, present_plan_json, ImageFileCodec, LogProgress,
};
use lite_upscale_application::{
    ApplicationError, ErrorKind, RasterExporter, RasterLoader, ScaleRequest, UpscalePipeline,
};

#[derive(Debug, Parser)]
#[command(name = "lite-upscale", version, about = "Progressive image upscaler with deferred full-resolution export")]
struct Cli {
    /// JSON configuration file; built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upscale an image, write its preview and optionally the full-resolution export.
    Run {
        input: PathBuf,
        #[arg(long)]
        scale: f64,
        #[arg(long)]
        preview: PathBuf,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Print what an upscale would materialize, as JSON, without scaling.
    Plan {
        input: PathBuf,
        #[arg(long)]
        scale: f64,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_pipeline(config: &AppConfig) -> UpscalePipeline {
    debug!("building pipeline with {config:?}");
    UpscalePipeline::new(Arc::new(config.surface()), config.pipeline_settings())
}

fn run_command(cli: Cli) -> Result<(), CommandError> {
    let config = AppConfig::load(cli.config.as_deref())
        .map_err(|error| CommandError::Usage(error.to_string()))?;
    let pipeline = build_pipeline(&config);
    let codec = ImageFileCodec;

    match cli.command {
        Command::Plan { input, scale } => {
            let source = codec.load(&input).map_err(failed("load"))?;
            let plan = pipeline
                .plan(source.dimensions(), scale)
                .map_err(failed("plan"))?;
            println!("{}", present_plan_json(&plan));
            Ok(())
        }
        Command::Run {
            input,
            scale,
            preview,
            export,
        } => {
            let source = codec.load(&input).map_err(failed("load"))?;
            let mut progress = LogProgress::new("upscale");
            let output = pipeline
                .upscale(ScaleRequest::new(&source, scale).with_progress(&mut progress))
                .map_err(failed("upscale"))?;
            codec
                .export(output.preview.image(), &preview)
                .map_err(failed("preview export"))?;
            println!("{}", present_output(&output));

            if let Some(export) = export {
                let mut progress = LogProgress::new("export");
                let full = pipeline
                    .materialize_full(&output.result, &mut progress)
                    .map_err(failed("materialize"))?;
                codec.export(&full, &export).map_err(failed("export"))?;
                println!("{}", present_materialized(&full, &export.display().to_string()));
            }
            Ok(())
        }
    }
}

fn failed(stage: &'static str) -> impl Fn(ApplicationError) -> CommandError {
    move |error| match error.kind() {
        ErrorKind::InvalidInput => CommandError::Usage(format!("{stage} failed: {error}")),
        _ => CommandError::Runtime(format!("{stage} failed: {error}")),
    }
}
