mod commands;
mod config;
mod logger;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use rdfbind_datasource::DataSourceRegistry;
use rdfbind_fourstore::FourStoreDataSourceFactory;
use rdfbind_testkit::TestDataSourceFactory;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(name = "rdfbind")]
#[command(about = "Query and update RDF data sources", version)]
struct Args {
    /// Sets a custom config file (.toml format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn registry() -> DataSourceRegistry {
    let mut registry = DataSourceRegistry::new();
    registry.register(Arc::new(FourStoreDataSourceFactory));
    registry.register(Arc::new(TestDataSourceFactory));
    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = config::load_configuration(args.config.as_deref())
        .context("Failed to load configuration")?;
    logger::initialize(&config.logger);

    let factory = config.data_source.factory.as_str();
    let data_source = registry()
        .create(factory, &config.data_source.options)
        .with_context(|| format!("Failed to create {factory} data source"))?;

    data_source
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {} data source", data_source.name()))?;
    tracing::debug!(data_source = data_source.name(), "Connected");

    let mut stdout = std::io::stdout().lock();
    let result = args.command.run(data_source.as_ref(), &mut stdout).await;

    data_source.disconnect().await;
    result
}
