use clap::Args;

/// Keywords looked for when none are given
pub const DEFAULT_KEYWORDS: [&str; 4] = [
    "Greater than",
    "Brilliant",
    "Recommendation",
    "Your Result",
];

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Keyword to look for; repeat for several (defaults to the dashboard markers)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Search the whole used range of every sheet instead of the fixed window
    #[arg(long)]
    pub all_sheets: bool,

    /// Last row of the search window
    #[arg(long, default_value_t = 59)]
    pub max_row: u32,

    /// Last column of the search window
    #[arg(long, default_value_t = 14)]
    pub max_col: u32,
}

impl FindArgs {
    pub fn keywords(&self) -> Vec<String> {
        if self.keywords.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            self.keywords.clone()
        }
    }
}
