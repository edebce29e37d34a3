use ampa_core::config::Configuration;
use ampa_core::error::{AmpaError, AmpaResult};
use ampa_core::state::AmpaState;
use ampa_jobs::SharedCtx;
use axum::{Extension, Router};

use crate::cli::ServerCli;

pub async fn run(cli: ServerCli, config: Configuration) -> AmpaResult<()> {
    info!("Starting {}", ampa_core::package_full());
    let state = AmpaState::new(config.clone()).await?;
    let mailer = crate::init::build_mailer(&config)?;

    if cli.no_scheduler {
        info!("Reminder scheduler disabled, cron endpoint only");
    } else {
        let sctx = SharedCtx::new(state.get_db_client().await?, config.clone(), mailer.clone());
        tokio::spawn(ampa_jobs::scheduler(sctx));
    }

    let router = Router::new();
    let router = crate::api::setup_api_routes(router);
    let router = router.layer(Extension(state)).layer(Extension(mailer));

    info!("Listening on {}", config.listen_on);
    axum::Server::bind(&config.listen_on)
        .serve(router.into_make_service())
        .await
        .map_err(|e| AmpaError::Other(e.to_string()))?;
    Ok(())
}
