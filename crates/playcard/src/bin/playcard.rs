//! playcard CLI: recognize the rank and suit of one card photo.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use playcard::detect::{load_rgb, rgb_view, FsTemplateLoader, ImageDumpObserver};
use playcard::glyphs::CachingLoader;
use playcard::io::{optional_path, RecognizeConfig, RecognizeReport};
use playcard::{CardRecognition, Classification};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Exit status when recognition ran but a glyph was not classified.
const EXIT_INCOMPLETE: u8 = 2;

#[derive(Parser)]
#[command(name = "playcard")]
#[command(about = "Recognize the rank and suit of a playing card in a photo")]
#[command(version)]
struct Cli {
    /// JSON config; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input image.
    image: Option<PathBuf>,

    /// Template root holding `Ranks/` and `Suits/`.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Template file extension.
    #[arg(long)]
    ext: Option<String>,

    /// Directory for intermediate PNGs.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Path to write the JSON report.
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) {
    let _ = playcard::core::init_with_level(level.into());
}

#[cfg(feature = "tracing")]
fn init_logging(level: LogLevel) {
    // `log` records are bridged by the subscriber's own log tracer.
    playcard::core::init_tracing(false, level.into());
}

fn resolve_config(cli: &Cli) -> CliResult<RecognizeConfig> {
    let mut config = match &cli.config {
        Some(path) => RecognizeConfig::load_json(path)?,
        None => RecognizeConfig::default(),
    };
    let as_string = |p: &Path| p.display().to_string();
    if let Some(image) = &cli.image {
        config.image_path = Some(as_string(image));
    }
    if let Some(dir) = &cli.templates {
        config.templates_dir = as_string(dir);
    }
    if let Some(ext) = &cli.ext {
        config.template_extension = ext.clone();
    }
    if let Some(dir) = &cli.debug_dir {
        config.debug_dir = Some(as_string(dir));
    }
    if let Some(report) = &cli.report {
        config.output_path = Some(as_string(report));
    }
    Ok(config)
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = resolve_config(&cli)?;
    let image_path = optional_path(&config.image_path)
        .ok_or("no input image: pass IMAGE or set image_path in --config")?;

    let img = load_rgb(&image_path)?;
    let recognizer = config.build_recognizer();
    let loader = CachingLoader::new(FsTemplateLoader);

    let result = match optional_path(&config.debug_dir) {
        Some(dir) => {
            let mut observer = ImageDumpObserver::new(dir)?;
            recognizer.recognize_with_observer(&rgb_view(&img), &loader, &mut observer)
        }
        None => recognizer.recognize(&rgb_view(&img), &loader),
    };

    if let Some(path) = optional_path(&config.output_path) {
        RecognizeReport::new(&image_path, &config, &result).write_json(&path)?;
        log::info!("report written to {}", path.display());
    }

    let recognition = result?;
    print_recognition(&recognition);
    Ok(if recognition.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INCOMPLETE)
    })
}

fn print_recognition(rec: &CardRecognition) {
    let describe = |c: &Classification, name: &'static str| match c {
        Classification::Matched(_) => name,
        Classification::Unmatched => "unmatched",
        Classification::NoContour => "no contour",
    };
    println!("rank: {}", describe(&rec.rank, rec.rank_name()));
    println!("suit: {}", describe(&rec.suit, rec.suit_name()));
}
