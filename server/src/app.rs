//! Core application

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::ApiError;
use crate::core::cli::{self, CliConfig, Commands, Entity, parse_object};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::PostgresService;
use crate::data::filters::{FilterObject, Resource, compile_filter, compile_filter_params};
use crate::data::postgres::repositories::{company, job};
use crate::data::sql::Backend;
use crate::data::update::{check_update_fields, compile_update_with};

pub struct CoreApp {
    pub config: AppConfig,
    pub database: PostgresService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let output = match command {
            Commands::Filter {
                resource,
                filters,
                bind,
                dialect,
            } => {
                let filters = parse_object(&filters)?;
                filter(resource, &filters, bind, dialect)
            }
            Commands::Update {
                entity,
                payload,
                dialect,
            } => {
                let payload = parse_object(&payload)?;
                update(entity, &payload, dialect)
            }
            Commands::Search { resource, filters } => {
                let filters = match filters {
                    Some(raw) => parse_object(&raw)?,
                    None => Map::new(),
                };
                let app = Self::init(&cli_config).await?;
                let result = app.search(resource, &filters).await;
                app.database.close().await;
                result
            }
        };

        match output {
            Ok(text) => {
                println!("{}", text);
                Ok(())
            }
            Err(err) => {
                println!("{}", serde_json::to_string_pretty(&err.body())?);
                Err(err.into())
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli.config.as_deref())?;
        let database = PostgresService::init(&config.database).await?;
        Ok(Self { config, database })
    }

    /// Run a filtered search and render the rows as JSON
    async fn search(
        &self,
        resource: Resource,
        filters: &Map<String, Value>,
    ) -> Result<String, ApiError> {
        let pool = self.database.pool();
        let mode = self.config.filters.mode;
        match resource {
            Resource::Company => {
                let rows = company::find_companies(pool, filters, mode).await?;
                tracing::debug!(count = rows.len(), "Companies found");
                to_json(&rows)
            }
            Resource::Job => {
                let rows = job::find_jobs(pool, filters, mode).await?;
                tracing::debug!(count = rows.len(), "Jobs found");
                to_json(&rows)
            }
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}

/// Render a WHERE clause, inline or with bind parameters
fn filter(
    resource: Resource,
    filters: &FilterObject,
    bind: bool,
    dialect: Backend,
) -> Result<String, ApiError> {
    if bind {
        let clause = compile_filter_params(resource, filters, dialect.dialect())?;
        to_json(&clause)
    } else {
        Ok(compile_filter(resource, filters)?)
    }
}

/// Render the SET clause for an entity's partial update
fn update(
    entity: Entity,
    payload: &Map<String, Value>,
    dialect: Backend,
) -> Result<String, ApiError> {
    check_update_fields(payload, entity.updatable_fields())?;
    let set = compile_update_with(payload, entity.field_map(), dialect.dialect())?;
    to_json(&set)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}
