use chrono::{DateTime, Utc};
use mongodb::{
    bson::{self, doc},
    options::ClientOptions,
    Client, Collection, Database,
};
use tracing::{info, warn};
use std::time::Duration;

use crate::{errors::AppError, settings::{AppConfig, ConnectionMode}};

/// Handle to the portfolio database.
///
/// Built once at process start and cloned into every repository. In
/// `Shared` mode all clones use one connected client; in `PerRequest` mode
/// each store operation opens its own client from the parsed options.
#[derive(Clone)]
pub struct MongoStore {
    mode: StoreMode,
}

#[derive(Clone)]
enum StoreMode {
    Shared(Database),
    PerRequest {
        options: ClientOptions,
        database_name: String,
    },
}

impl MongoStore {
    pub async fn connect(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(&config.database_url).await?;
        options.app_name = Some(config.name.clone());
        options.max_pool_size = Some(config.db_max_pool_size);
        options.server_selection_timeout = Some(config.db_timeout());
        options.connect_timeout = Some(config.db_timeout());

        let database = connect_with_retry(&options, &config.database_name).await?;

        let mode = match config.connection_mode {
            ConnectionMode::Shared => StoreMode::Shared(database),
            ConnectionMode::PerRequest => StoreMode::PerRequest {
                options,
                database_name: config.database_name.clone(),
            },
        };

        Ok(MongoStore { mode })
    }

    pub async fn database(&self) -> Result<Database, AppError> {
        match &self.mode {
            StoreMode::Shared(database) => Ok(database.clone()),
            StoreMode::PerRequest { options, database_name } => {
                let client = Client::with_options(options.clone())?;
                Ok(client.database(database_name))
            }
        }
    }

    pub async fn collection<T>(&self, name: &str) -> Result<Collection<T>, AppError>
    where
        T: Send + Sync,
    {
        Ok(self.database().await?.collection::<T>(name))
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.database().await?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

async fn connect_with_retry(
    options: &ClientOptions,
    database_name: &str,
) -> Result<Database, mongodb::error::Error> {
    let max_retries = 5;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        let client = Client::with_options(options.clone())?;
        let database = client.database(database_name);

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                info!("MongoDB connection established.");
                return Ok(database);
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                warn!(
                    "Failed to connect to MongoDB (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds);

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

pub fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn from_bson_datetime(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
