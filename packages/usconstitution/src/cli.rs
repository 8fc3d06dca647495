//! Command-line interface.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{LoadOptions, TEXT_WRAP_WIDTH};
use crate::error::{ConstitutionError, Result};
use crate::export::{self, ExportFormat};
use crate::loader::{load_embedded, load_from_path};
use crate::locator::from_loc_id;
use crate::provision::Node;
use crate::text::wrap_text;
use crate::types::Constitution;

/// US Constitution provision paths, headings, citations and loc-ids.
#[derive(Parser)]
#[command(name = "usconstitution")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON document to load instead of the embedded one
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Path prefix for rendered paths (e.g., /constitution-conan)
    #[arg(long, global = true, default_value = "")]
    pub prefix: String,

    /// Keep nested clause lists out of their parent clause's text
    #[arg(long, global = true)]
    pub no_flatten: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the path of every provision.
    Paths,

    /// Print the heading of every provision.
    Headings,

    /// Print the citation of every provision.
    Citations,

    /// Parse a loc-id and print the provision it addresses.
    Locate {
        /// Loc-id, optionally with an essay suffix (e.g., ArtI.S8.C1.1)
        loc_id: String,
    },

    /// Print the text of a provision.
    Show {
        /// Loc-id of the provision (e.g., Amdt14.S1)
        loc_id: String,

        /// Wrap width for the provision text
        #[arg(short, long, default_value_t = TEXT_WRAP_WIDTH)]
        width: usize,
    },

    /// Export every provision as flat records.
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let constitution = load(&cli)?;

    match cli.command {
        Commands::Paths => print_lines(constitution.paths()),
        Commands::Headings => print_lines(constitution.headings()),
        Commands::Citations => print_lines(constitution.citations()),
        Commands::Locate { loc_id } => locate_command(&constitution, &loc_id),
        Commands::Show { loc_id, width } => show_command(&constitution, &loc_id, width),
        Commands::Export { format, output } => {
            export_command(&constitution, format, output.as_deref())
        }
    }
}

fn load(cli: &Cli) -> Result<Constitution> {
    let options =
        LoadOptions::with_prefix(cli.prefix.clone()).with_flatten_clauses(!cli.no_flatten);
    match &cli.data {
        Some(path) => load_from_path(path, &options),
        None => load_embedded(&options),
    }
}

fn print_lines(lines: impl Iterator<Item = String>) -> Result<()> {
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Execute the locate command.
fn locate_command(constitution: &Constitution, loc_id: &str) -> Result<()> {
    let (stub, rest) = from_loc_id(loc_id)?;
    let prefix = &constitution.path_prefix;

    println!("{} {}", style("Kind:").bold(), stub.kind().as_str());
    println!("{} {}", style("Loc-id:").bold(), style(stub.loc_id()).cyan());
    println!("{} {}", style("Path:").bold(), stub.path(prefix));
    println!("{} {}", style("Heading:").bold(), stub.heading(""));
    println!("{} {}", style("Citation:").bold(), stub.citation(""));
    if !rest.is_empty() {
        println!("{} {}", style("Remainder:").bold(), style(rest).yellow());
    }
    if constitution.resolve(&stub).is_none() {
        println!("{}", style("Not present in the document").yellow());
    }
    Ok(())
}

/// Execute the show command.
fn show_command(constitution: &Constitution, loc_id: &str, width: usize) -> Result<()> {
    let (node, rest) = constitution
        .lookup(loc_id)?
        .ok_or_else(|| ConstitutionError::NotFound(loc_id.to_string()))?;

    println!("{}", style(node.heading("")).bold());
    if !node.name().is_empty() {
        println!("{}", style(node.name()).green());
    }
    println!("{}", style(node.citation("")).dim());
    if !rest.is_empty() {
        println!("{} {}", style("Remainder:").bold(), style(rest).yellow());
    }
    println!();

    let text = match node {
        Node::Section(section) => section.fulltext(),
        _ => node.content().to_string(),
    };
    if text.is_empty() {
        for child in node.children() {
            println!("  {} {}", style(child.label()).cyan(), child.name());
        }
    } else {
        println!("{}", wrap_text(&text, width));
    }
    Ok(())
}

/// Execute the export command.
fn export_command(
    constitution: &Constitution,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            export::save(constitution, format, path)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{}", export::render(&export::document(constitution), format)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_paths() {
        let cli = Cli::parse_from(["usconstitution", "paths"]);
        assert!(matches!(cli.command, Commands::Paths));
        assert!(cli.prefix.is_empty());
        assert!(cli.data.is_none());
        assert!(!cli.no_flatten);
    }

    #[test]
    fn test_cli_parse_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "usconstitution",
            "headings",
            "--prefix",
            "/constitution-conan",
            "--no-flatten",
        ]);
        assert!(matches!(cli.command, Commands::Headings));
        assert_eq!(cli.prefix, "/constitution-conan");
        assert!(cli.no_flatten);
    }

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["usconstitution", "show", "ArtI.S8.C1"]);
        let Commands::Show { loc_id, width } = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(loc_id, "ArtI.S8.C1");
        assert_eq!(width, TEXT_WRAP_WIDTH);
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "usconstitution",
            "export",
            "--format",
            "yaml",
            "-o",
            "out.yaml",
        ]);
        let Commands::Export { format, output } = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(format, ExportFormat::Yaml);
        assert_eq!(output, Some(PathBuf::from("out.yaml")));
    }

    #[test]
    fn test_cli_parse_export_defaults_to_json() {
        let cli = Cli::parse_from(["usconstitution", "export"]);
        let Commands::Export { format, output } = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(format, ExportFormat::Json);
        assert!(output.is_none());
    }
}
