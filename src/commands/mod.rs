pub mod config;
pub mod convert;
pub mod dashboard;
pub mod extract;
pub mod find;
pub mod grade;
pub mod inspect;
pub mod output;
pub mod scores;

use anyhow::Result;
use log::info;

use crate::cli::{Cli, Commands};
use crate::cli::commands::InspectCommands;

pub use config::config_command;
pub use convert::convert_command;
pub use dashboard::dashboard_command;
pub use extract::extract_command;
pub use find::find_command;
pub use grade::grade_command;
pub use scores::scores_command;

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;

    if let Commands::Config(sub) = command {
        return config_command(sub, &global);
    }

    let config = global.resolve_config()?;
    let print = !global.no_print;
    info!(
        "Using workbook {:?}, sheet '{}'",
        config.workbook, config.sheet
    );

    match command {
        Commands::Extract => extract_command(&config, print).map(|_| ()),
        Commands::Convert => convert_command(&config, print).map(|_| ()),
        Commands::Dashboard => dashboard_command(&config, print).map(|_| ()),
        Commands::All => {
            extract_command(&config, print)?;
            convert_command(&config, print)?;
            dashboard_command(&config, print)?;
            Ok(())
        }
        Commands::Scores => scores_command(&config),
        Commands::Inspect(sub) => match sub {
            InspectCommands::Sheets { head } => inspect::sheets_command(&config, head),
            InspectCommands::Cells { first_row, last_row } => {
                inspect::cells_command(&config, first_row, last_row)
            }
            InspectCommands::Validations => inspect::validations_command(&config),
            InspectCommands::Formulas => inspect::formulas_command(&config),
            InspectCommands::Dashboard { first_row, last_row } => {
                inspect::dashboard_command(&config, first_row, last_row)
            }
        },
        Commands::Find(args) => find_command(&config, &args),
        Commands::Grade(args) => grade_command(&config, &args, print),
        Commands::Config(_) => unreachable!("handled before loading the config"),
    }
}
