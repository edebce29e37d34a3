use clap::{Args, Parser, Subcommand};

pub mod getconfres;
pub mod list_classes;
pub mod run_job;
pub mod server;

#[derive(Parser, Debug)]
#[clap(author, version, about = "AMPA portal notification service", long_about = None)]
pub struct AppCli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the notification service
    Server(ServerCli),
    /// Run a specific job manually, then exit
    RunJob(RunJobCli),
    /// List classes and their enrollment counts
    ListClasses,
    /// Print the resolved configuration
    GetConfig,
}

#[derive(Args, Debug)]
pub struct ServerCli {
    /// Disable the in-process reminder scheduler; reminder passes then only
    /// run when the cron endpoint is called
    #[clap(long, short = 'z')]
    pub no_scheduler: bool,
}

#[derive(Args, Debug)]
pub struct RunJobCli {
    #[clap(subcommand)]
    pub job: RunJobSelect,
}

#[derive(Subcommand, Debug)]
pub enum RunJobSelect {
    /// Run a reminder pass as of today (or the given date)
    EventReminders {
        /// Treat this date as "today" when computing reminder windows
        #[clap(long)]
        date: Option<chrono::NaiveDate>,
        /// Override the configured day offsets
        #[clap(long = "interval")]
        intervals: Vec<i64>,
    },
    /// Send the new-event announcement for one event
    AnnounceEvent { event_id: uuid::Uuid },
}
