use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "muqarrar")]
#[command(author, version, about = "Telegram bot distributing course materials for the Managil medical faculty", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot in normal mode
    Run {
        /// Use webhook mode instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Create the database and apply schema migrations, then exit
    Migrate,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
