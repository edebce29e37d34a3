use ampa_models::Client;

use crate::app::DBPool;
use crate::config::Configuration;
use crate::error::AmpaResult;

#[derive(Clone, Debug)]
pub struct AmpaState {
    pub config: Configuration,
    pub db_pool: DBPool,
    pub client: Client,
}

impl AmpaState {
    pub async fn new(config: Configuration) -> AmpaResult<Self> {
        let db_pool = config.db_conn().await?;
        let client = Client::new(db_pool.clone());
        Ok(Self {
            config,
            db_pool,
            client,
        })
    }

    pub async fn get_db_pool(&self) -> DBPool {
        self.db_pool.clone()
    }

    pub async fn get_db_client(&self) -> AmpaResult<Client> {
        Ok(self.client.clone())
    }

    pub fn get_config(&self) -> &Configuration {
        &self.config
    }
}
