use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use madola::{config::InterpreterConfig, evaluate_with_config};
use tracing_subscriber::EnvFilter;

/// madola runs MADOLA engineering calculations: numbers with units, complex
/// numbers, vectors and matrices.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells madola to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Prints every output line of the program to stdout.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Prints the full evaluation result as JSON.
    #[arg(long)]
    json: bool,

    /// Adds a directory to the module search path.
    #[arg(short = 'I', long = "import-path")]
    import_paths: Vec<PathBuf>,

    contents: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let config = args.import_paths
                     .into_iter()
                     .fold(InterpreterConfig::from_env(), InterpreterConfig::with_import_path);
    let result = evaluate_with_config(&script, config);

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize the result: {e}");
                return ExitCode::FAILURE;
            },
        }
    } else if args.pipe_mode {
        for line in &result.outputs {
            println!("{line}");
        }
    }

    if let Some(error) = &result.error {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
