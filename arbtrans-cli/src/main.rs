use std::path::PathBuf;
use std::str::FromStr;

use arbtrans::{BatchStrategy, language::KNOWN_LANGUAGES, read_resource};
use arbtrans_cli::{
    RETRY_PROMPT, TranslateArgs,
    logging::init_logging,
    run_translate_command,
    translate::describe_output,
    validation::{validate_inputs, validate_language_code, validate_resource_file},
    view::print_view,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one or more .arb files. Several outputs are zipped together.
    Translate {
        /// The .arb files to translate
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Target language code (default: ru, or the configured one)
        #[arg(short, long = "to")]
        to: Option<String>,

        /// Root directory for job outputs
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Job identifier, used as the output subdirectory name
        #[arg(long)]
        job_id: Option<String>,

        /// How values are sent to the provider: joined or per-entry
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<BatchStrategy>,

        /// Path to an arbtrans.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base URL of the translation service
        #[arg(long)]
        endpoint: Option<String>,

        /// Copy values unchanged instead of calling the provider
        #[arg(long)]
        identity: bool,
    },

    /// View the entries of an .arb file.
    View {
        /// The input file to view
        input: String,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },

    /// List language codes known to work as translation targets.
    Languages,
}

fn parse_strategy(s: &str) -> Result<BatchStrategy, String> {
    BatchStrategy::from_str(s).map_err(|e| e.to_string())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", RETRY_PROMPT);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.commands {
        Commands::Translate {
            inputs,
            to,
            out,
            job_id,
            strategy,
            config,
            endpoint,
            identity,
        } => {
            if let Err(e) = validate_inputs(&inputs) {
                fail(e);
            }
            if let Some(lang) = &to {
                if let Err(e) = validate_language_code(lang) {
                    fail(e);
                }
            }

            let args = TranslateArgs {
                inputs,
                target_language: to,
                output_dir: out,
                job_id,
                strategy,
                config,
                endpoint,
                identity,
            };
            match run_translate_command(args) {
                Ok(output) => println!("{}", describe_output(&output)),
                Err(e) => fail(e),
            }
        }
        Commands::View { input, full } => {
            if let Err(e) = validate_resource_file(&input) {
                fail(e);
            }
            match read_resource(&input) {
                Ok(resource) => print_view(&resource, full),
                Err(e) => fail(e),
            }
        }
        Commands::Languages => {
            for (code, name) in KNOWN_LANGUAGES {
                println!("{:<4} {}", code, name);
            }
        }
    }
}
