use clap::{ArgAction, Parser};
use std::path::PathBuf;

use imgfx::logging;
use imgfx::models::{EngineConfig, Invocation, CONFIG_ENV};
use imgfx::services::Pipeline;

#[derive(Parser)]
#[command(name = "imgfx")]
#[command(version)]
#[command(about = "Apply a pipeline of image transforms, in the order given")]
#[command(after_help = "\
Flags:
  -input <path>                  source image (required, once)
  -output <path>                 write the current image (repeatable)
  -pipe <command>                pipe the current image as JPEG to a shell command
  -brighten <f>  -contrast <f>  -saturation <f>
  -channel red|green|blue        -grayscale
  -quantize <bits>               -black-white <cutoff>
  -random-dither <bits>          -floyd-steinberg-dither <bits>
  -edge-detect  -edge-detect-base  -random-noise  -sharpen  -blur
  -sample point|bilinear|gaussian
  -crop <x> <y> <w> <h>  -rotate <degrees>  -scale <fx> <fy>

Example:
  imgfx -input in.png -sample bilinear -rotate 30 -sharpen -output out.png")]
struct Cli {
    /// YAML file with engine tuning (falls back to $IMGFX_CONFIG)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging (repeat for debug output)
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Pipeline flags, processed left to right
    #[arg(
        value_name = "FLAGS",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    flags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let invocation = Invocation::parse(&cli.flags)?;
    let config = EngineConfig::resolve(
        cli.config.as_deref(),
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
    )?;

    let summary = Pipeline::new(config).run(&invocation)?;
    tracing::info!(
        filters = summary.filters_applied,
        width = summary.final_dims.0,
        height = summary.final_dims.1,
        outputs = summary.delivered.len(),
        "Done"
    );
    Ok(())
}
