use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use khiin_cli::commands::build_ops::BuildRequest;
use khiin_cli::commands::{build_ops, config_ops, keys_ops};
use khiin_cli::trace_init::init_tracing;
use khiin_core::dataset::source::InputFiles;
use khiin_core::dataset::BuildOptions;

#[derive(Parser)]
#[command(name = "dbgen", about = "Khiin IME database build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the database from frequency and conversion lists
    ///
    /// All `input` columns are normalized into lower case, space-separated
    /// syllables, and every table is deduplicated.
    Build(BuildArgs),
    /// Show the key sequences generated for a word
    Keys {
        /// Word in Lomaji, e.g. "chia̍h-pn̄g"
        word: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Frequencies CSV (columns: input, freq, chhan_id)
    #[arg(short, long, value_name = "FILE")]
    frequencies: PathBuf,
    /// Conversions CSV (columns: input, output, weight, category, annotation)
    #[arg(short, long, value_name = "FILE")]
    conversions: PathBuf,
    /// Additional syllables, one per line, without tones
    #[arg(short, long, value_name = "FILE")]
    syllables: Option<PathBuf>,
    /// Add all tones of every additional syllable as words
    #[arg(short, long)]
    tones: bool,
    /// Exclude zero-frequency items from the frequencies CSV
    #[arg(short = 'x', long)]
    exclude_zeros: bool,
    /// Weight Hanji outputs 1000 and Lomaji outputs 900, ignoring `weight`
    #[arg(short = 'j', long)]
    hanji_first: bool,
    /// Write an SQL script
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Write an SQLite database directly
    #[arg(short, long, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Include a tab-delimited symbols table
    #[arg(short = 'y', long, value_name = "FILE")]
    symbols: Option<PathBuf>,
    /// Include the emoji CSV as a table
    #[arg(short, long, value_name = "FILE")]
    emoji: Option<PathBuf>,
    /// Custom settings TOML
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

impl From<BuildArgs> for BuildRequest {
    fn from(args: BuildArgs) -> Self {
        BuildRequest {
            inputs: InputFiles {
                frequencies: args.frequencies,
                conversions: args.conversions,
                syllables: args.syllables,
                symbols: args.symbols,
                emoji: args.emoji,
            },
            options: BuildOptions {
                exclude_zeros: args.exclude_zeros,
                auto_tones: args.tones,
                hanji_first: args.hanji_first,
            },
            output: args.output,
            db: args.db,
            settings: args.settings,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => build_ops::build(&args.into()),
        Command::Keys { word } => keys_ops::keys(&word),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
