use clap::{Parser, Subcommand};

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::constants::ENV_CONFIG;
use crate::data::filters::Resource;
use crate::data::sql::Backend;
use crate::data::update::{
    COMPANY_FIELDS, COMPANY_UPDATABLE, FieldMap, JOB_FIELDS, JOB_UPDATABLE, USER_FIELDS,
    USER_UPDATABLE,
};

#[derive(Parser)]
#[command(name = "jobly")]
#[command(version, about = "Job board search and update SQL tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

/// Tables that accept partial updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Company,
    Job,
    User,
}

impl Entity {
    pub fn field_map(&self) -> FieldMap<'static> {
        match self {
            Entity::Company => COMPANY_FIELDS,
            Entity::Job => JOB_FIELDS,
            Entity::User => USER_FIELDS,
        }
    }

    /// Payload keys a partial update may set
    pub fn updatable_fields(&self) -> &'static [&'static str] {
        match self {
            Entity::Company => COMPANY_UPDATABLE,
            Entity::Job => JOB_UPDATABLE,
            Entity::User => USER_UPDATABLE,
        }
    }
}

/// Parse searchable resource from CLI string
fn parse_resource(s: &str) -> Result<Resource, String> {
    match s.to_lowercase().as_str() {
        "company" | "companies" => Ok(Resource::Company),
        "job" | "jobs" => Ok(Resource::Job),
        _ => Err(format!(
            "Invalid resource '{}'. Valid options: company, job",
            s
        )),
    }
}

/// Parse update entity from CLI string
fn parse_entity(s: &str) -> Result<Entity, String> {
    match s.to_lowercase().as_str() {
        "company" | "companies" => Ok(Entity::Company),
        "job" | "jobs" => Ok(Entity::Job),
        "user" | "users" => Ok(Entity::User),
        _ => Err(format!(
            "Invalid entity '{}'. Valid options: company, job, user",
            s
        )),
    }
}

/// Parse SQL dialect from CLI string
fn parse_backend(s: &str) -> Result<Backend, String> {
    match s.to_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(Backend::Postgres),
        "sqlite" => Ok(Backend::Sqlite),
        _ => Err(format!(
            "Invalid dialect '{}'. Valid options: postgres, sqlite",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print the WHERE clause for a search filter object
    Filter {
        /// Resource to search (company or job)
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        /// Filter object as JSON, e.g. '{"name": "net", "minEmployees": 10}'
        filters: String,
        /// Bind values as placeholders instead of interpolating them
        #[arg(long)]
        bind: bool,
        /// Placeholder style for --bind
        #[arg(long, default_value = "postgres", value_parser = parse_backend)]
        dialect: Backend,
    },
    /// Print the SET clause for a partial update payload
    Update {
        /// Table to update (company, job or user)
        #[arg(value_parser = parse_entity)]
        entity: Entity,
        /// Update payload as JSON, e.g. '{"firstName": "Aliya"}'
        payload: String,
        /// Placeholder style
        #[arg(long, default_value = "postgres", value_parser = parse_backend)]
        dialect: Backend,
    },
    /// Run a filtered search against the configured database
    Search {
        /// Resource to search (company or job)
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        /// Filter object as JSON (omit to list everything)
        filters: Option<String>,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    (CliConfig { config: cli.config }, cli.command)
}

/// Parse a JSON argument that must be an object
pub fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("Argument is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("Expected a JSON object, got: {}", other),
    }
}
