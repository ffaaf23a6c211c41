use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Default, ValueEnum)]
enum OutputFormat {
    /// Metrics plus an annotated department table
    #[default]
    Table,
    /// Tab-separated rows for scripting
    Tsv,
    /// Full assessment as JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the dashboard (default if no subcommand)
    Dash {
        /// Score table to assess (CSV; defaults to the configured input)
        file: Option<PathBuf>,
    },
    /// Print a one-shot assessment to stdout
    Report {
        /// Score table to assess (CSV; defaults to the configured input)
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Write a certified risk report
    Export {
        /// Score table to assess (CSV; defaults to the configured input)
        file: Option<PathBuf>,

        /// Certificate path (defaults to <input>.certificate.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a starter config interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "rsrtf")]
#[command(about = "Railway safety risk dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rsrtf/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Resolve the score table path: CLI argument first, then the configured
/// default input.
fn resolve_input(file: Option<PathBuf>, config: &rsrtf::config::Config) -> Option<PathBuf> {
    file.or_else(|| config.input.clone())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dash { file: None });

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = rsrtf::config::run_init_wizard(config_path) {
            eprintln!("Init error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match rsrtf::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Zone: {}", config.zone());
        if let Some(ref input) = config.input {
            eprintln!("Configured default input: {}", input.display());
        }
    }

    match command {
        Commands::Dash { file } => {
            let Some(input) = resolve_input(file, &config) else {
                print_missing_input_hint();
                std::process::exit(EXIT_INPUT);
            };

            let assessment = match rsrtf::load::load_and_assess(&input, cli.verbose) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let app = rsrtf::tui::App::new(
                input,
                config.zone().to_string(),
                assessment,
                cli.verbose,
            );
            if let Err(e) = rsrtf::tui::run_tui(app).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Report { file, format } => {
            let Some(input) = resolve_input(file, &config) else {
                print_missing_input_hint();
                std::process::exit(EXIT_INPUT);
            };

            let assessment = match rsrtf::load::load_and_assess(&input, cli.verbose) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            match format {
                OutputFormat::Table => {
                    let use_colors = rsrtf::output::should_use_colors();
                    println!("{}", rsrtf::output::format_metrics(&assessment, use_colors));
                    println!();
                    println!(
                        "{}",
                        rsrtf::output::format_assessment_table(&assessment, use_colors)
                    );
                }
                OutputFormat::Tsv => {
                    let tsv = rsrtf::output::format_tsv(&assessment);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => match rsrtf::output::format_json(&assessment) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            }
        }
        Commands::Export { file, output } => {
            let Some(input) = resolve_input(file, &config) else {
                print_missing_input_hint();
                std::process::exit(EXIT_INPUT);
            };

            let assessment = match rsrtf::load::load_and_assess(&input, cli.verbose) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let output =
                output.unwrap_or_else(|| rsrtf::certificate::default_certificate_path(&input));
            if let Err(e) =
                rsrtf::certificate::write_certificate(&output, &assessment, config.zone())
            {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
            println!("Certificate written to {}", output.display());
        }
        Commands::Init => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_missing_input_hint() {
    eprintln!("No score table given.");
    eprintln!("Pass a CSV file:");
    eprintln!("  rsrtf report scores.csv");
    eprintln!("or set a default in ~/.config/rsrtf/config.yaml:");
    eprintln!("  input: reports/latest-scores.csv");
}
