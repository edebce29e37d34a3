#[macro_use]
extern crate tracing;

use clap::Parser;

use ampa_core::config::Configuration;
use ampa_core::error::AmpaResult;

mod api;
mod cli;
mod init;

fn main() -> AmpaResult<()> {
    use tokio::runtime::Builder;
    let runtime = Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name_fn(|| {
            use std::sync::atomic::{AtomicUsize, Ordering};
            static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
            let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
            format!("ampa-{}", id)
        })
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async_main())
}

async fn async_main() -> AmpaResult<()> {
    crate::init::init_logging();
    let cli = cli::AppCli::parse();
    let config = Configuration::from_env()?;
    match cli.command {
        cli::Command::Server(opts) => cli::server::run(opts, config).await,
        cli::Command::RunJob(opts) => cli::run_job::run_job(opts, config).await,
        cli::Command::ListClasses => cli::list_classes::list_classes(config).await,
        cli::Command::GetConfig => cli::getconfres::get_config(config),
    }
}
