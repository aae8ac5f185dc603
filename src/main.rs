use clap::Parser;
use mileapp_provision::{
    conf::{load_dotenv, AppConfig},
    db::connect,
    o11y::build_subscriber,
    provision,
};
use tracing::{error, info};

/// Provision the MileApp MongoDB schema: the users and tasks
/// collections and the indexes the application queries against.
#[derive(Parser)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// MongoDB connection string, overrides the configured value
    #[arg(long, env = "MONGODB_URI")]
    uri: Option<String>,

    /// Name of the database to provision, overrides the configured value
    #[arg(long, env = "MONGODB_DATABASE")]
    database: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file before anything else
    load_dotenv();

    let args = Cli::parse();

    let subscriber = build_subscriber().expect("failed to build subscriber");
    tracing::subscriber::set_global_default(subscriber).expect("failed to install subscriber");

    let mut config = match AppConfig::from_path(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(uri) = args.uri {
        config.database.uri = uri;
    }
    if let Some(database) = args.database {
        config.database.name = database;
    }

    let client = match connect(&config.database).await {
        Ok(client) => client,
        Err(e) => {
            error!("failed to connect to mongodb: {}", e);
            std::process::exit(1);
        }
    };
    info!("successfully connected to mongodb");

    let db = client.database(&config.database.name);
    let result = provision::run(&db).await;

    // release the connection on both exit paths before reporting the outcome
    client.shutdown().await;

    match result {
        Ok(()) => info!("database provisioning complete"),
        Err(e) => {
            error!("failed to setup collections or indexes: {}", e);
            std::process::exit(1);
        }
    }
}
