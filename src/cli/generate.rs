//! Generate command handler.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::config::Config;
use crate::{java, pipeline, scan};

use super::InputArgs;

/// Run a generation pass and write the injector sources.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for generated sources (overrides `output.dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command.
    pub fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        self.input.apply(&mut config);
        if let Some(output) = self.output {
            config.output.dir = output;
        }

        let files = scan::scan_dir(&config.input.dir, &config.input.extension)?;
        let plan = pipeline::run(files)?;

        let written = java::write_plan(&plan, &config.output.dir, &config.java)?;
        tracing::info!(
            "Generated {} injector(s) in {}",
            written.len(),
            config.output.dir.display()
        );

        Ok(())
    }
}
