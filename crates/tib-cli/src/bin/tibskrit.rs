use clap::{Parser, Subcommand};

use tib_cli::commands::{accuracy_ops, config_ops, convert_ops};
use tib_cli::trace_init::init_tracing;
use tib_core::normalize::NormalForm;

#[derive(Parser)]
#[command(name = "tibskrit", about = "Tibetan-script Sanskrit to IAST")]
struct Cli {
    /// Write log events to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate files (or stdin) to IAST
    Convert {
        /// Input files; stdin when omitted
        files: Vec<String>,
        /// Normalization form: nfd or nfc (default: from settings)
        #[arg(long)]
        form: Option<NormalForm>,
        /// Custom settings TOML file
        #[arg(long)]
        settings: Option<String>,
        /// Output the conversion report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical Unicode form of the input
    Normalize {
        /// Input files; stdin when omitted
        files: Vec<String>,
        /// Normalization form: nfd or nfc (default: from settings)
        #[arg(long)]
        form: Option<NormalForm>,
        /// Print one U+XXXX label per codepoint
        #[arg(long)]
        codepoints: bool,
    },
    /// Run transliteration accuracy tests from a TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Normalization form: nfd or nfc (default: from settings)
        #[arg(long)]
        form: Option<NormalForm>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export or validate settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Export default settings as TOML
    Export,
    /// Validate a custom settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Convert {
            files,
            form,
            settings,
            json,
        } => convert_ops::convert_cmd(&files, form, settings.as_deref(), json),
        Command::Normalize {
            files,
            form,
            codepoints,
        } => convert_ops::normalize_cmd(&files, form, codepoints),
        Command::Accuracy {
            corpus_file,
            form,
            verbose,
            json,
        } => accuracy_ops::accuracy_cmd(&corpus_file, form, verbose, json),
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
}
