//! logsynth - synthetic demo log generator
//!
//! Usage:
//!   logsynth
//!   logsynth generate --seed 7 --output - --format pretty
//!   logsynth phases

use clap::{Parser, Subcommand};
use logsynth::config::{self, DEFAULT_OUTPUT, DEFAULT_SEED};
use logsynth::{GeneratorConfig, OutputFormat, Script, SynthError, Synthesizer, output};
use std::path::PathBuf;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "logsynth")]
#[command(about = "Deterministic synthetic JSON logs for demo recordings")]
struct Cli {
    /// Log phase progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the demo log (default)
    Generate {
        /// Seed for every random draw
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Simulated start time (RFC 3339)
        #[arg(long, default_value = "2025-01-15T06:00:00Z", value_parser = parse_start)]
        start: chrono::DateTime<chrono::Utc>,

        /// Output file, or `-` for stdout
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Line format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Show the phase script and the record count it produces
    Phases,
}

fn parse_start(s: &str) -> Result<chrono::DateTime<chrono::Utc>, SynthError> {
    config::parse_start(s)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let result = match cli.command {
        None => run_generate(GeneratorConfig::default()),
        Some(Commands::Generate {
            seed,
            start,
            output,
            format,
        }) => run_generate(GeneratorConfig {
            seed,
            start,
            output,
            format,
        }),
        Some(Commands::Phases) => run_phases(),
    };

    if let Err(e) = result {
        error!(error = %e, "Generation failed.");
        eprintln!("logsynth: {}", e);
        std::process::exit(1);
    }
}

fn run_generate(config: GeneratorConfig) -> Result<(), SynthError> {
    info!(
        seed = config.seed,
        start = %logsynth::format_timestamp(&config.start),
        output = %config.output.display(),
        "Generating demo log."
    );

    let script = Script::demo()?;
    let mut engine = Synthesizer::new(&config);
    engine.run(&script);

    let stats = engine.stats().clone();
    let records = engine.into_records();
    let summary = output::write_to_path(&records, config.format, &config.output)?;

    for (level, count) in &stats.by_level {
        info!(severity = level.as_str(), count, "Level breakdown.");
    }
    info!(
        records = summary.records,
        bytes = summary.bytes,
        digest = %format!("{:016x}", summary.digest),
        "Output written."
    );

    let line = format!(
        "Generated {} lines to {}",
        summary.records,
        config.output.display()
    );
    if config.writes_to_stdout() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
    Ok(())
}

fn run_phases() -> Result<(), SynthError> {
    let script = Script::demo()?;

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Demo Log Phase Script                      ║");
    println!("╠══════════════════════════════════════════════════════════════╣");

    for phase in script.phases() {
        let anchors: Vec<String> = phase.anchors.iter().map(|a| a.delta.to_string()).collect();
        let traffic = match &phase.traffic {
            Some(t) => format!("{} ticks @ {} ({})", t.ticks, t.delta, t.scenario.name()),
            None => "no traffic".to_string(),
        };
        println!(
            "║ {:15} anchors [{:12}] {:30} ║",
            phase.name,
            anchors.join(" "),
            traffic
        );
    }

    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ Total records: {:45} ║", script.expected_records());
    println!("╚══════════════════════════════════════════════════════════════╝");
    Ok(())
}
