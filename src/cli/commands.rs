use crate::domain::values::search_filter::{SearchFilter, DEFAULT_PAGE, DEFAULT_ROWS};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "p2pwatch", about = "P2P advertisement collector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `search` and `collect`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Crypto asset ticker
    #[arg(long, default_value = "USDT")]
    pub asset: String,
    /// Fiat currency code
    #[arg(long, default_value = "XAF")]
    pub fiat: String,
    /// Advertisement direction (BUY or SELL)
    #[arg(long, default_value = "BUY")]
    pub trade_type: String,
    /// Payment method identifier as used by the exchange
    #[arg(long)]
    pub pay_method: Option<String>,
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u32,
    /// Results per page (max 20)
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: u32,
}

impl SearchArgs {
    pub fn to_filter(&self) -> SearchFilter {
        SearchFilter {
            asset: self.asset.clone(),
            fiat: self.fiat.clone(),
            trade_type: self.trade_type.clone(),
            pay_method: self.pay_method.clone(),
            page: self.page,
            rows: self.rows,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search advertisements and print them as JSON
    Search {
        #[command(flatten)]
        filter: SearchArgs,
    },
    /// Search, write spreadsheet + JSON backup, and store in the database
    Collect {
        #[command(flatten)]
        filter: SearchArgs,
        /// Spreadsheet format (xlsx, csv)
        #[arg(long, default_value = "xlsx")]
        format: String,
        /// Output file name prefix (default: <exchange>_p2p)
        #[arg(long)]
        prefix: Option<String>,
        /// Override P2PWATCH_OUTPUT_DIR
        #[arg(long)]
        output_dir: Option<String>,
        /// Skip the database write
        #[arg(long)]
        no_db: bool,
    },
    /// Stored listings ordered by price
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Highest price first
        #[arg(long)]
        desc: bool,
        #[arg(long)]
        asset: Option<String>,
        #[arg(long)]
        fiat: Option<String>,
        #[arg(long)]
        trade_type: Option<String>,
    },
    /// Most recent capture runs
    Runs {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
