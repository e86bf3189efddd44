use clap::{Parser, Subcommand};

/// Inspect and edit the bookstore cart from the terminal.
#[derive(Debug, Parser)]
#[command(name = "cart-console", version)]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart
    Show {
        /// Line ids to tick for checkout in the summary
        #[arg(long = "select", value_name = "LINE_ID")]
        select: Vec<i64>,
    },
    /// Change the quantity of a cart line
    Set { line_id: i64, quantity: u32 },
    /// Remove a line from the cart
    Remove { line_id: i64 },
    /// Remove every line from the cart
    Clear,
}
