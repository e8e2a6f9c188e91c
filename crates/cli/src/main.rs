use anyhow::{Context, Result, bail};
use argkit_parse::{ArgumentSet, parse_arguments, split};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

#[derive(Parser)]
#[command(name = "argkit")]
#[command(version, about = "Tokenize and query command-line strings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a command line into tokens
    Split(SplitArgs),

    /// Classify a command line into positional and named arguments
    Parse(ParseArgs),

    /// Print the value of one argument
    Get(GetArgs),

    /// Validate required arguments and allowed values
    Check(CheckArgs),
}

#[derive(Parser)]
struct SplitArgs {
    /// Command line to split (default: read stdin)
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Option<String>,

    /// Print a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ParseArgs {
    /// Command line to classify (default: read stdin)
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Option<String>,

    /// Print a JSON object
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct GetArgs {
    /// Positional index (`0`, `1`, ...) or flag name without dashes
    #[arg(value_name = "KEY")]
    key: String,

    /// Command line to query (default: read stdin)
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Option<String>,

    /// Type to convert the value to
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
    value_type: ValueType,

    /// Fail with an error instead of exiting quietly when the value is unavailable
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Command line to validate (default: read stdin)
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Option<String>,

    /// Argument that must be present with a non-blank value
    #[arg(short, long = "require", value_name = "KEY")]
    require: Vec<String>,

    /// Restrict an argument to a set of values: KEY=A,B,C
    #[arg(long = "one-of", value_name = "KEY=VALUES")]
    one_of: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueType {
    String,
    Integer,
    Float,
    Decimal,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Split(args) => split_command(args),
        Commands::Parse(args) => parse_command(args),
        Commands::Get(args) => get_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn split_command(args: SplitArgs) -> Result<()> {
    tracing::debug!("executing split command");

    let input = read_input(args.input)?;
    let tokens = split(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in tokens {
            println!("{token}");
        }
    }

    Ok(())
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let set = load_arguments(args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        for (key, value) in &set {
            println!("{key}={value}");
        }
    }

    Ok(())
}

fn get_command(args: GetArgs) -> Result<()> {
    tracing::debug!(key = %args.key, "executing get command");

    let set = load_arguments(args.input)?;
    let key = args.key.as_str();

    let value = match args.value_type {
        ValueType::String => set.get_value(key, args.strict)?.map(str::to_string),
        ValueType::Integer => set
            .get_value_as_integer(key, args.strict)?
            .map(|v| v.to_string()),
        ValueType::Float => set
            .get_value_as_float(key, args.strict)?
            .map(|v| v.to_string()),
        ValueType::Decimal => set
            .get_value_as_decimal(key, args.strict)?
            .map(|v| v.to_string()),
    };

    match value {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => {
            tracing::debug!(key, "no usable value");
            std::process::exit(1);
        }
    }
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    if args.require.is_empty() && args.one_of.is_empty() {
        bail!("nothing to check; pass --require or --one-of");
    }

    let set = load_arguments(args.input)?;

    for key in &args.require {
        set.validate(key)?;
    }

    for rule in &args.one_of {
        let (key, allowed) = parse_one_of(rule)?;
        set.validate_with(
            key,
            |value| allowed.iter().any(|candidate| *candidate == value),
            format!("expected one of: {}", allowed.join(", ")),
        )?;
    }

    eprintln!("OK: {} argument(s) checked", args.require.len() + args.one_of.len());

    Ok(())
}

fn parse_one_of(rule: &str) -> Result<(&str, Vec<&str>)> {
    let (key, values) = rule
        .split_once('=')
        .context("one-of format should be KEY=A,B,C")?;
    let allowed: Vec<&str> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();
    if allowed.is_empty() {
        bail!("one-of rule for `{}` lists no values", key.trim());
    }
    Ok((key.trim(), allowed))
}

fn read_input(input: Option<String>) -> Result<String> {
    match input {
        Some(input) if input != "-" => Ok(input),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

fn load_arguments(input: Option<String>) -> Result<ArgumentSet> {
    let input = read_input(input)?;
    parse_arguments(&input).context("input contains no arguments")
}

/// Log to stderr so stdout only carries command output. `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
