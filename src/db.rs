use std::time::Duration;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use tracing::instrument;

use crate::conf::DatabaseConfig;

#[derive(thiserror::Error, Debug)]
#[error("failed to connect to database")]
pub struct ConnectError(#[from] mongodb::error::Error);

#[derive(thiserror::Error, Debug)]
#[error("failed to create index")]
pub struct CreateIndexError(#[from] mongodb::error::Error);

/// Connect to the server described by the config and verify it is
/// reachable before handing the client out. The ping keeps failures at
/// the connection step instead of surfacing at the first write.
#[instrument(skip_all, err)]
pub async fn connect(config: &DatabaseConfig) -> Result<Client, ConnectError> {
    let mut options = ClientOptions::parse(&config.uri).await?;

    let timeout = Duration::from_secs(config.connect_timeout_secs);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    let client = Client::with_options(options)?;

    client
        .database(&config.name)
        .run_command(doc! { "ping": 1 })
        .await?;

    Ok(client)
}

/// Create an index with the given key document, returning the name the
/// server assigned to it. Submitting a spec identical to an existing
/// index is a no-op on the server side.
#[instrument(skip(collection, keys), fields(collection = collection.name()), err)]
pub async fn create_index(
    collection: &Collection<Document>,
    keys: Document,
    unique: bool,
) -> Result<String, CreateIndexError> {
    let index_model = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(unique).build())
        .build();
    let created = collection.create_index(index_model).await?;
    Ok(created.index_name)
}
