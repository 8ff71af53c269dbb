//! CLI module for prefgen.
//!
//! Subcommands:
//! - `generate`: Run a generation pass and write injector sources
//! - `check`: Run a generation pass without writing anything

mod check;
mod generate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

pub use check::CheckCommand;
pub use generate::GenerateCommand;

/// prefgen - Preference injector generator
#[derive(Parser)]
#[command(name = "prefgen")]
#[command(about = "Generates preference injectors from component and class declarations")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve all declarations and write the generated injectors
    Generate(GenerateCommand),

    /// Resolve all declarations and report the injectors that would be generated
    Check(CheckCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Generate(cmd) => cmd.run(),
            Command::Check(cmd) => cmd.run(),
        }
    }
}

/// Input overrides shared by every pass-running subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Directory containing declaration files (overrides `input.dir`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Declaration file extension (overrides `input.extension`)
    #[arg(long)]
    pub extension: Option<String>,
}

impl InputArgs {
    /// Applies the overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.input {
            config.input.dir = dir.clone();
        }
        if let Some(extension) = &self.extension {
            config.input.extension = extension.trim_start_matches('.').to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_with_overrides() {
        let app = App::parse_from([
            "prefgen",
            "-v",
            "generate",
            "--input",
            "decls",
            "--output",
            "out",
        ]);
        assert!(app.verbose);
        match app.command {
            Command::Generate(cmd) => {
                assert_eq!(cmd.input.input, Some(PathBuf::from("decls")));
                assert_eq!(cmd.output, Some(PathBuf::from("out")));
            }
            Command::Check(_) => panic!("expected generate"),
        }
    }

    #[test]
    fn test_input_args_apply() {
        let mut config = Config::default();
        InputArgs {
            input: Some(PathBuf::from("decls")),
            extension: Some(".decl".to_string()),
        }
        .apply(&mut config);

        assert_eq!(config.input.dir, PathBuf::from("decls"));
        assert_eq!(config.input.extension, "decl");
    }
}
