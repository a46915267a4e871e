use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dayplan", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task at a time of day
    ///
    /// Example: dayplan add "Standup" 0900
    /// Example: dayplan add "Lunch" 12.30
    Add { title: String, time: String },
    /// List tasks sorted by time
    ///
    /// Example: dayplan list
    List,
    /// Toggle completion of the task at a list position
    ///
    /// Example: dayplan done 1
    Done { position: usize },
    /// Delete the task at a list position
    ///
    /// Example: dayplan delete 2
    Delete { position: usize },
}
