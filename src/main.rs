use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lantern::{config, generate, output, setup};

#[derive(Parser)]
#[command(name = "lantern")]
#[command(about = "Minimal incremental static site generator")]
#[command(long_about = "\
Minimal incremental static site generator

Markdown documents with YAML front matter are rendered through named
templates into a mirrored HTML tree. Only stale targets are rebuilt:
an output is regenerated when it is not strictly newer than its source
document and its template.

Project structure:

  mysite/
  ├── _lantern.yaml                # Build configuration
  ├── index.md                     # Document: front matter + markdown
  ├── guides/
  │   └── install.md               # Nested documents mirror into _build/
  ├── _templates/
  │   ├── default.html             # Used when no `template:` is declared
  │   └── guide.html               # Used via `template: guide`
  ├── _static/
  │   └── styles.css               # Copied verbatim when stale
  └── _build/                      # Output tree (the incremental cache)

Run 'lantern setup <DIR>' to scaffold a new project.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site, rebuilding only stale targets
    Build {
        /// Path to the project configuration file
        #[arg(long, default_value = "_lantern.yaml")]
        config: PathBuf,
    },
    /// Set up a new project in the named directory
    Setup {
        /// Project directory to create (must not exist)
        directory: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { config: path } => build(&path),
        Command::Setup { directory } => {
            println!("{}Setting up lantern site ...{}", output::BLUE, output::RESET);
            if let Err(err) = setup::setup(&directory) {
                fail(&err.to_string(), None);
            }
            println!("{}... {}Done!{}", output::BLUE, output::YELLOW, output::RESET);
        }
    }
}

fn build(config_path: &Path) {
    let config = match config::load_config(config_path) {
        Ok(config) => config,
        Err(err) => fail(&err.to_string(), err.remediation().as_deref()),
    };

    // Source/build paths resolve against the config file's directory,
    // so `lantern build --config path/to/_lantern.yaml` works from anywhere.
    let project_root = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    output::print_checking();
    match generate::generate(&config, project_root) {
        Ok(updates) => output::print_summary(updates),
        Err(err) => fail(&err.to_string(), None),
    }
}

fn fail(message: &str, details: Option<&str>) -> ! {
    eprintln!("{}\n", output::format_error(message));
    if let Some(details) = details {
        eprintln!("{details}\n");
    }
    std::process::exit(1);
}
