use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sigpad::config::Config;
use sigpad::pad::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SignaturePad};
use sigpad::replay;
use sigpad::sink::{self, FileSink};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sigpad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIGPAD_GIT_HASH"), ")"),
    about = "Freehand signature capture, recording and replay"
)]
struct Cli {
    /// Replay a JSON input script through the pad and print the signature
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Load a saved signature onto the pad before anything else
    #[arg(long, value_name = "SIGNATURE")]
    regenerate: Option<PathBuf>,

    /// Export the resulting signature as a PNG image
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Write published signatures to this file
    #[arg(long, value_name = "FILE")]
    sink: Option<PathBuf>,

    /// Wrap sink writes in a versioned document
    #[arg(long, action = ArgAction::SetTrue, requires = "sink")]
    envelope: bool,

    /// Check a saved signature and report its segment count
    #[arg(long, value_name = "SIGNATURE")]
    validate: Option<PathBuf>,

    /// Print the JSON schema of the configuration file
    #[arg(long, action = ArgAction::SetTrue)]
    print_config_schema: bool,

    /// Write a default configuration file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    /// Use this configuration file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Surface width in pixels (defaults to the script's surface)
    #[arg(long)]
    width: Option<i32>,

    /// Surface height in pixels (defaults to the script's surface)
    #[arg(long)]
    height: Option<i32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::default().write_new(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if let Some(file) = &cli.validate {
        let signature = sink::load_signature(file)?;
        println!(
            "{}: valid signature with {} segments",
            file.display(),
            signature.len()
        );
        return Ok(());
    }

    if cli.replay.is_none() && cli.regenerate.is_none() {
        print_usage();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let script = match &cli.replay {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read input script {}", path.display()))?;
            let script = replay::parse_script(&text)
                .with_context(|| format!("failed to parse input script {}", path.display()))?;
            Some(script)
        }
        None => None,
    };

    let (script_width, script_height) = script.as_ref().map_or(
        (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        |script| (script.surface.width, script.surface.height),
    );
    let width = cli.width.unwrap_or(script_width);
    let height = cli.height.unwrap_or(script_height);

    let mut pad = SignaturePad::new(config.to_pad_config(), width, height);
    if let Some(path) = &cli.sink {
        log::info!("Publishing signatures to {}", path.display());
        pad = pad.with_sink(Box::new(FileSink::new(path).with_envelope(cli.envelope)));
    }

    if let Some(path) = &cli.regenerate {
        let signature = sink::load_signature(path)?;
        pad.regenerate(&signature);
        log::info!(
            "Regenerated {} segments from {}",
            signature.len(),
            path.display()
        );
    }

    if let Some(script) = &script {
        let finished = replay::run(&mut pad, script);
        log::debug!("{} drawing sessions finished", finished.len());
    }

    pad.validate()?;

    if let Some(path) = &cli.png {
        let file = File::create(path)
            .with_context(|| format!("failed to create image file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        pad.export_png(&mut writer)
            .with_context(|| format!("failed to export signature to {}", path.display()))?;
        log::info!("Signature image written to {}", path.display());
    }

    println!("{}", pad.signature_string());
    Ok(())
}

fn print_usage() {
    println!("sigpad: Freehand signature capture, recording and replay");
    println!();
    println!("Usage:");
    println!("  sigpad --replay <SCRIPT>         Draw a scripted input session and print the signature");
    println!("  sigpad --regenerate <SIGNATURE>  Load a saved signature and print it back");
    println!("  sigpad --validate <SIGNATURE>    Check a saved signature");
    println!("  sigpad --print-config-schema     Print the config file schema");
    println!("  sigpad --init-config             Write a default config file");
    println!("  sigpad --help                    Show help");
    println!();
    println!("Options for --replay and --regenerate:");
    println!("  --png <FILE>     Export the signature as PNG");
    println!("  --sink <FILE>    Write published signatures to FILE (add --envelope for a versioned document)");
    println!("  --width/--height Surface size (default 198x55)");
    println!();
    println!("Configuration: ~/.config/sigpad/config.toml");
}
