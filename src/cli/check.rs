//! Check command handler.

use clap::Parser;
use color_eyre::Result;

use crate::config::Config;
use crate::pipeline::GenerationPlan;
use crate::{pipeline, scan};

use super::InputArgs;

/// Run a generation pass without writing anything.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the generation plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command.
    pub fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        self.input.apply(&mut config);

        let files = scan::scan_dir(&config.input.dir, &config.input.extension)?;
        let plan = pipeline::run(files)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_summary(&plan);
        }

        Ok(())
    }
}

fn print_summary(plan: &GenerationPlan) {
    for injector in &plan.injectors {
        println!("{}", injector.qualified_name());
        for assignment in &injector.assignments {
            println!("  {}", assignment);
        }
    }
    println!("{} injector(s) resolved", plan.len());
}
