use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use divergesia::models::AppConfig;
use divergesia::rendering::MockupRenderer;
use divergesia::services::{exporter, palette_io, ExportFormat, ExtractionService};
use palette_engine::PaletteRecord;

#[derive(Parser)]
#[command(name = "divergesia")]
#[command(about = "Divergesia - extract color palettes from images and derive harmonies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract dominant colors from an image
    Extract {
        /// Image file (PNG, JPEG, GIF, BMP or WebP)
        image: PathBuf,

        /// Number of colors (defaults to the configured count)
        #[arg(short = 'n', long)]
        colors: Option<usize>,

        /// Cluster the full-size image instead of a downscaled copy
        #[arg(long)]
        no_resize: bool,

        /// Write the palette here (format from --format or the extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json, css or csv
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Shift hue, saturation and value of a saved palette
    Shift {
        /// Palette JSON file
        palette: PathBuf,

        /// Hue rotation in degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        hue: f64,

        /// Saturation offset in percentage points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        sat: f64,

        /// Value offset in percentage points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        val: f64,

        /// Overwrite the palette file instead of writing a derived palette
        #[arg(long, conflicts_with = "output")]
        in_place: bool,

        /// Where to write the derived palette (printed only when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Derive a harmony from a saved palette
    Harmony {
        /// Palette JSON file
        palette: PathBuf,

        /// complementary, analogous, analogous_spread, triadic, triadic_shift,
        /// tetradic, tetradic_shift, monochromatic or monochromatic_step
        kind: String,

        /// Where to write the derived palette (printed only when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a saved palette as JSON, CSS or CSV
    Export {
        /// Palette JSON file
        palette: PathBuf,

        /// Output file
        output: PathBuf,

        /// Output format (defaults to the output file extension)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Render a palette mockup to a PNG file
    Mockup {
        /// Palette JSON file
        palette: PathBuf,

        /// Output PNG file path
        output: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },
    /// Print a saved palette
    Show {
        /// Palette JSON file
        palette: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "divergesia=info,palette_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load();

    match command {
        Commands::Extract {
            image,
            colors,
            no_resize,
            output,
            format,
        } => {
            run_extract_command(&config, &image, colors, no_resize, output, format.as_deref()).await
        }
        Commands::Shift {
            palette,
            hue,
            sat,
            val,
            in_place,
            output,
        } => run_shift_command(&palette, hue, sat, val, in_place, output),
        Commands::Harmony {
            palette,
            kind,
            output,
        } => run_harmony_command(&config, &palette, &kind, output),
        Commands::Export {
            palette,
            output,
            format,
        } => {
            let mut record = palette_io::load_palette(&palette)?;
            let format = resolve_format(&config, &output, format.as_deref())?;
            exporter::export(&mut record, &output, format)?;
            println!("Exported {} ({format})", output.display());
            Ok(())
        }
        Commands::Mockup {
            palette,
            output,
            width,
            height,
        } => {
            let record = palette_io::load_palette(&palette)?;
            let renderer = MockupRenderer::new(
                width.unwrap_or(config.mockup.width),
                height.unwrap_or(config.mockup.height),
            )?;
            let png_bytes = renderer.render_png(record.colors())?;
            std::fs::write(&output, &png_bytes)?;
            println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());
            Ok(())
        }
        Commands::Show { palette } => {
            let record = palette_io::load_palette(&palette)?;
            print_palette(&record);
            Ok(())
        }
    }
}

/// Explicit flag, else a known output extension, else the configured default
fn resolve_format(
    config: &AppConfig,
    output: &Path,
    flag: Option<&str>,
) -> anyhow::Result<ExportFormat> {
    if let Some(flag) = flag {
        return Ok(flag.parse()?);
    }
    let known_extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.parse::<ExportFormat>().is_ok());
    if known_extension {
        Ok(ExportFormat::from_path(output))
    } else {
        Ok(config.export.default_format.parse()?)
    }
}

async fn run_extract_command(
    config: &AppConfig,
    image: &Path,
    colors: Option<usize>,
    no_resize: bool,
    output: Option<PathBuf>,
    format: Option<&str>,
) -> anyhow::Result<()> {
    let mut options = config.extract_options(colors);
    if no_resize {
        options = options.resize_for_speed(false);
    }
    let k = options.k;
    let service = ExtractionService::new(options);

    let Some(mut record) = service.extract(image, k).await? else {
        anyhow::bail!("extraction of {} was superseded", image.display());
    };
    print_palette(&record);

    if let Some(output) = output {
        let format = resolve_format(config, &output, format)?;
        exporter::export(&mut record, &output, format)?;
        println!("\nWrote {} ({format})", output.display());
    }
    Ok(())
}

fn run_shift_command(
    palette: &Path,
    hue: f64,
    sat: f64,
    val: f64,
    in_place: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut record = palette_io::load_palette(palette)?;

    if in_place {
        record.apply_hsv_shift(hue, sat, val);
        palette_io::save_palette(&mut record, palette)?;
        print_palette(&record);
        return Ok(());
    }

    let mut derived = record.with_hsv_shift(hue, sat, val);
    print_palette(&derived);
    if let Some(output) = output {
        palette_io::save_palette(&mut derived, &output)?;
        println!("\nWrote {}", output.display());
    }
    Ok(())
}

fn run_harmony_command(
    config: &AppConfig,
    palette: &Path,
    kind: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let record = palette_io::load_palette(palette)?;
    let harmony = config.harmony(kind)?;
    let mut derived = record.with_harmony(&harmony);
    print_palette(&derived);
    if let Some(output) = output {
        palette_io::save_palette(&mut derived, &output)?;
        println!("\nWrote {}", output.display());
    }
    Ok(())
}

fn print_palette(record: &PaletteRecord) {
    println!("{}", record.name);
    if !record.source_image_path.is_empty() {
        println!("  source:  {}", record.source_image_path);
    }
    if !record.harmony_kind.is_empty() {
        println!("  harmony: {}", record.harmony_kind);
    }
    if let Some(saved) = &record.saved_path {
        println!("  file:    {saved}");
    }
    println!();
    if record.colors().is_empty() {
        println!("  (no colors)");
    }
    for (i, color) in record.colors().iter().enumerate() {
        println!("  {:>2}. {}  {}", i + 1, color.to_hex(), color);
    }
    for (key, value) in &record.parameters {
        println!("  {key}: {value}");
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Divergesia v{VERSION}");
    println!("Color palettes from images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("divergesia=info,palette_engine=warn (default)")
    );

    let config_source = match config_file {
        Some(path) if Path::new(&path).exists() => path,
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  divergesia extract   Extract dominant colors from an image");
    println!("  divergesia shift     Shift hue/saturation/value of a palette");
    println!("  divergesia harmony   Derive a harmony from a palette");
    println!("  divergesia export    Export a palette as JSON, CSS or CSV");
    println!("  divergesia mockup    Render a palette mockup to PNG");
    println!("  divergesia show      Print a palette");
    println!("\nRun 'divergesia --help' for more details.");
}
