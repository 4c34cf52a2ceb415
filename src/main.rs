use clap::{Parser as ClapParser, Subcommand};
use std::io;
use std::path::PathBuf;
use tag_formula::cli::{
    self, BackspaceOptions, CliError, EvalOptions, SuggestOptions, format_number,
};

#[derive(ClapParser)]
#[command(name = "tagf")]
#[command(about = "Tokenize, edit and evaluate formulas with {{variable}} tags")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a formula as JSON
    Tokenize {
        /// Formula text, or `-` (reads from stdin if not provided)
        formula: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the span of the tag a backspace at OFFSET would remove
    TagAt {
        /// Formula text, or `-` to read from stdin
        formula: String,
        offset: usize,
    },

    /// Apply one backspace and print the resulting text and cursor
    Backspace {
        /// Formula text, or `-` to read from stdin
        formula: String,

        /// Cursor position (defaults to the end of the formula)
        #[arg(short, long)]
        cursor: Option<usize>,
    },

    /// Evaluate a formula
    Eval {
        /// Formula text, or `-` (reads from stdin if not provided)
        formula: Option<String>,

        /// Variable value, repeatable
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// JSON object of variables, or an array of suggestion records
        #[arg(long = "vars", visible_alias = "vars-file", value_name = "FILE")]
        vars_file: Option<PathBuf>,
    },

    /// List suggestions for a fragment
    Suggest {
        fragment: String,

        /// JSON array of suggestion records
        #[arg(short, long)]
        source: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Tokenize { formula, pretty } => {
            let formula = formula_input(formula)?;
            print_json(&cli::execute_tokenize(&formula), pretty)
        }
        Commands::TagAt { formula, offset } => {
            let formula = formula_input(Some(formula))?;
            print_json(&cli::execute_tag_at(&formula, offset), false)
        }
        Commands::Backspace { formula, cursor } => {
            let formula = formula_input(Some(formula))?;
            let outcome = cli::execute_backspace(&BackspaceOptions { formula, cursor });
            print_json(&outcome, false)
        }
        Commands::Eval {
            formula,
            vars,
            vars_file,
        } => {
            let options = EvalOptions {
                formula: formula_input(formula)?,
                vars: vars
                    .iter()
                    .map(|arg| cli::parse_assignment(arg))
                    .collect::<Result<_, _>>()?,
                vars_file,
            };
            println!("{}", format_number(cli::execute_eval(&options)?));
            Ok(())
        }
        Commands::Suggest {
            fragment,
            source,
            pretty,
        } => {
            let candidates = cli::execute_suggest(&SuggestOptions { fragment, source }).await?;
            print_json(&candidates, pretty)
        }
    }
}

fn formula_input(formula: Option<String>) -> Result<String, CliError> {
    cli::read_formula(formula, atty::is(atty::Stream::Stdin), io::stdin())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}
