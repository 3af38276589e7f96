//! CLI entry point for grove

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use termcolor::{ColorChoice, StandardStream};

use grove::output::megabytes;
use grove::{
    ConsoleDiagnostics, EntryTable, HighlightConfig, Navigator, Scanner, TreeFormatter, write_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "grove")]
#[command(about = "Browse a folder as a tree, highlight large files and inspect metadata")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Cmd>,

    /// Settings file (default: <config dir>/grove/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Hide file sizes in the tree
    #[arg(long = "no-size", global = true)]
    no_size: bool,

    /// Show creation and last change dates in the tree
    #[arg(long = "dates", global = true)]
    dates: bool,

    /// Do not colour file names by size
    #[arg(long = "no-highlight", global = true)]
    no_highlight: bool,

    /// Abbreviate long absolute paths in tables
    #[arg(long = "short-paths", global = true)]
    short_paths: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the folder tree
    Tree {
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the metadata table of a file or folder
    Info { path: PathBuf },
    /// Show the metadata of every file in a folder
    Files {
        path: PathBuf,

        /// Include files in all subfolders
        #[arg(short, long)]
        recursive: bool,
    },
    /// Print the total size of a folder
    Size { path: PathBuf },
    /// Find the first folder (or file) with a given name
    Find {
        root: PathBuf,
        name: String,

        /// Search for a file instead of a folder
        #[arg(long)]
        file: bool,
    },
}

impl Args {
    fn load_config(&self) -> Result<HighlightConfig, grove::ConfigError> {
        let mut config = match &self.config {
            Some(path) => HighlightConfig::load(path)?,
            None => HighlightConfig::load_default()?,
        };
        if self.no_size {
            config.show_size = false;
        }
        if self.dates {
            config.show_creation_date = true;
            config.show_last_change = true;
        }
        if self.no_highlight {
            config.highlight = false;
        }
        if self.short_paths {
            config.shorten_paths = true;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let use_color = should_use_color(args.color);

    let config = args.load_config().unwrap_or_else(|e| {
        eprintln!("grove: {}", e);
        process::exit(1);
    });

    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let scanner = Scanner::new(ConsoleDiagnostics::new(use_color));

    let result = match args.command {
        None => {
            let stdin = io::stdin();
            let mut navigator = Navigator::new(stdin.lock(), &mut stdout, scanner, config);
            navigator.run()
        }
        Some(cmd) => run_command(cmd, scanner, &config, &mut stdout),
    };

    if let Err(e) = result {
        eprintln!("grove: error writing output: {}", e);
        process::exit(1);
    }
}

/// Only the root existence check stops a command; everything below it is
/// reported as a warning.
fn require_exists(path: &Path) {
    if !path.exists() {
        eprintln!(
            "grove: cannot access '{}': No such file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn run_command(
    cmd: Cmd,
    mut scanner: Scanner<ConsoleDiagnostics>,
    config: &HighlightConfig,
    stdout: &mut StandardStream,
) -> io::Result<()> {
    match cmd {
        Cmd::Tree { path, json } => {
            require_exists(&path);
            let tree = scanner.scan(&path);
            if json {
                write_json(&tree, stdout)
            } else {
                TreeFormatter::new(config).print(&tree, stdout)
            }
        }
        Cmd::Info { path } => {
            require_exists(&path);
            if path.is_dir() {
                match scanner.describe_folder(&path) {
                    Ok(entry) => EntryTable::folders(&[entry], config).print(stdout),
                    Err(e) => fail(&e),
                }
            } else {
                match scanner.describe_file(&path) {
                    Ok(entry) => EntryTable::files(&[entry], config).print(stdout),
                    Err(e) => fail(&e),
                }
            }
        }
        Cmd::Files { path, recursive } => {
            require_exists(&path);
            let entries: Vec<_> = scanner
                .list_files(&path, recursive)
                .iter()
                .filter_map(|p| {
                    scanner
                        .describe_file(p)
                        .inspect_err(|e| log::warn!("skipping {}", e))
                        .ok()
                })
                .collect();
            EntryTable::files(&entries, config).print(stdout)
        }
        Cmd::Size { path } => {
            require_exists(&path);
            let bytes = scanner.aggregate_size(&path);
            writeln!(stdout, "{} B ({:.2} MB)", bytes, megabytes(bytes))
        }
        Cmd::Find { root, name, file } => {
            require_exists(&root);
            let found = if file {
                scanner.find_file(&root, &name)
            } else {
                scanner.find_folder(&root, &name)
            };
            match found {
                Some(path) => writeln!(stdout, "{}", path.display()),
                None => {
                    eprintln!("grove: '{}' not found under '{}'", name, root.display());
                    process::exit(1);
                }
            }
        }
    }
}

fn fail(error: &grove::ScanError) -> ! {
    eprintln!("grove: {}", error);
    process::exit(1);
}
