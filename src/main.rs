use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ink_pipeline::Pipeline;
use inkwash::config::{parse_hex_color, AppConfig};
use inkwash::{capture, present};

#[derive(Parser)]
#[command(name = "inkwash")]
#[command(about = "Simulate an e-paper ink look for captured PNG frames")]
struct Cli {
    /// Input PNG frames (processed best-effort, one output per input)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input) or directory (multiple inputs)
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable pixelation (blocky downsampling)
    #[arg(long)]
    pixelation: bool,

    /// Enable Floyd-Steinberg dithering
    #[arg(long)]
    dithering: bool,

    /// Enable selective high-contrast binarization (on by default)
    #[arg(long, overrides_with = "no_high_contrast")]
    high_contrast: bool,

    /// Disable the high-contrast stage
    #[arg(long)]
    no_high_contrast: bool,

    /// Enable the backlight tint pass
    #[arg(long)]
    backlight: bool,

    /// Downsample granularity in CSS pixels (clamped 1-100)
    #[arg(long)]
    pixel_density: Option<f64>,

    /// Dither granularity (clamped 1-10)
    #[arg(long)]
    dither_density: Option<f64>,

    /// Backlight tint as hex RGB (e.g. "#FFA500")
    #[arg(long)]
    backlight_color: Option<String>,

    /// Device pixel ratio of the captured frames
    #[arg(long)]
    device_pixel_ratio: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkwash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load(cli.config.as_deref());
    apply_cli_overrides(&cli, &mut config)?;

    let pipeline = Pipeline::new(config.settings, config.device_pixel_ratio)?;
    if !pipeline.settings().has_effects() {
        tracing::info!("no effect enabled; all output will be suppressed");
    }

    let multiple = cli.inputs.len() > 1;
    if multiple {
        std::fs::create_dir_all(&cli.output)?;
    }

    for input in &cli.inputs {
        // One bad frame must not abort the whole batch
        let frame = match capture::load_frame(input) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(%e, input = %input.display(), "skipping unreadable frame");
                continue;
            }
        };

        match pipeline.run(frame) {
            Ok(Some(processed)) => {
                let out_path = output_path(&cli.output, input, multiple);
                present::write_frame(&out_path, &processed)?;
                tracing::info!(
                    input = %input.display(),
                    output = %out_path.display(),
                    "frame processed"
                );
            }
            Ok(None) => {
                tracing::info!(input = %input.display(), "output suppressed");
            }
            Err(e) => {
                // Frame-fatal: withhold output rather than show a partial frame
                tracing::error!(%e, input = %input.display(), "frame processing failed");
            }
        }
    }

    Ok(())
}

/// Layer CLI flags over the file configuration.
fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) -> anyhow::Result<()> {
    let settings = &mut config.settings;
    if cli.pixelation {
        settings.pixelation = true;
    }
    if cli.dithering {
        settings.dithering = true;
    }
    if cli.backlight {
        settings.backlight = true;
    }
    if cli.no_high_contrast {
        settings.high_contrast = false;
    } else if cli.high_contrast {
        settings.high_contrast = true;
    }
    if let Some(density) = cli.pixel_density {
        settings.pixel_density = density;
    }
    if let Some(density) = cli.dither_density {
        settings.dither_density = density;
    }
    if let Some(color) = &cli.backlight_color {
        settings.backlight_color = parse_hex_color(color)?;
    }
    if let Some(ratio) = cli.device_pixel_ratio {
        config.device_pixel_ratio = ratio;
    }
    Ok(())
}

/// Pick the output path for one input frame.
///
/// With multiple inputs (or an existing output directory) each frame goes
/// to `<output>/<stem>-ink.png`; otherwise `output` names the file.
fn output_path(output: &Path, input: &Path, multiple: bool) -> PathBuf {
    if multiple || output.is_dir() {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        output.join(format!("{stem}-ink.png"))
    } else {
        output.to_path_buf()
    }
}
