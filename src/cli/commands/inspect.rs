use clap::Subcommand;

#[derive(Subcommand)]
pub enum InspectCommands {
    /// List sheets with their size and first rows
    Sheets {
        /// Rows shown per sheet
        #[arg(long, default_value_t = 5)]
        head: u32,
    },
    /// Question and option cells (columns B and C)
    Cells {
        #[arg(long, default_value_t = 7)]
        first_row: u32,
        #[arg(long, default_value_t = 15)]
        last_row: u32,
    },
    /// Every data validation on the sheet
    Validations,
    /// Scoring formulas and the hidden helper columns G..R
    Formulas,
    /// Dashboard rows with their fill colours
    Dashboard {
        #[arg(long, default_value_t = 40)]
        first_row: u32,
        #[arg(long, default_value_t = 49)]
        last_row: u32,
    },
}
