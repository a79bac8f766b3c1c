use clap::{ArgAction, Parser, Subcommand};
use langpo_cli::{
    ToolPaths,
    convert::{run_convert_command, run_lang2po_command, run_po2lang_command},
    debug::run_debug_command,
    font::run_makefont_command,
    view::run_view_command,
};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a LANG file to a PO file.
    Lang2po {
        /// Path to the LANG file
        path: String,
        /// Path to the output PO file (defaults to the input with a .po extension)
        #[arg(short, long)]
        output: Option<String>,
        /// Language code written to the PO header
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Convert a PO file to a LANG file.
    Po2lang {
        /// Path to the PO file
        path: String,
        /// Path to the output LANG file (defaults to the input with a .lang extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert between LANG and PO, inferring both formats from the extensions.
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: String,
        /// The output file to write the results to
        #[arg(short, long)]
        output: String,
    },

    /// View localization files.
    View {
        /// The LANG or PO file to view
        path: String,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },

    /// Dump a localization file as JSON.
    Debug {
        /// The LANG or PO file to dump
        path: String,
        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the bitmap fonts of a language with bmfont.
    Makefont {
        /// Language name as listed in the font configuration
        language: String,
        /// Font configuration file
        #[arg(long, default_value = "languages.yaml")]
        config: PathBuf,
        /// Game installation root holding the LANG files and the fonts directory
        #[arg(long, env = "SOMA_PATH")]
        game_root: PathBuf,
        /// Directory holding the .bmfc font configurations
        #[arg(long, default_value = "fonts")]
        fonts_dir: PathBuf,
        /// The bmfont executable
        #[arg(long, default_value = "bin/bmfont64.exe")]
        bmfont: PathBuf,
        /// Print the bmfont command lines without running them
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.commands {
        Commands::Lang2po {
            path,
            output,
            language,
        } => run_lang2po_command(&path, output.as_deref(), &language),
        Commands::Po2lang { path, output } => run_po2lang_command(&path, output.as_deref()),
        Commands::Convert { input, output } => run_convert_command(&input, &output),
        Commands::View { path, full } => run_view_command(&path, full),
        Commands::Debug { path, output } => run_debug_command(&path, output.as_deref()),
        Commands::Makefont {
            language,
            config,
            game_root,
            fonts_dir,
            bmfont,
            dry_run,
        } => {
            let paths = ToolPaths {
                game_root,
                fonts_dir,
                bmfont,
            };
            run_makefont_command(&language, &config, &paths, dry_run)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
