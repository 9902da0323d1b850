use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use recitations::io::store::{DocumentStore, DryRunStore};
#[cfg(feature = "firestore")]
use recitations::io::store::{FirestoreConfig, FirestoreStore};
use recitations::{ImportConfig, ImportError, RecordEmitter, StoreTarget, run_import};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "recitation-import")]
#[command(about = "Group recitation rows from a CSV export and add one Firestore document per recitation", long_about = None)]
struct Cli {
    /// Path to the recitations CSV (may be gzip-compressed)
    #[arg(env = "RECITATIONS_CSV")]
    input: PathBuf,

    /// Target collection
    #[arg(long, env = "FIRESTORE_COLLECTION", default_value = "recitations")]
    collection: String,

    /// Google Cloud project id
    #[arg(long, env = "FIRESTORE_PROJECT_ID")]
    project_id: Option<String>,

    /// Firestore database id
    #[arg(long, env = "FIRESTORE_DATABASE", default_value = "(default)")]
    database: String,

    /// OAuth2 access token (e.g. from `gcloud auth print-access-token`)
    #[arg(long, env = "FIRESTORE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// host:port of a Firestore emulator
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    emulator_host: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FIRESTORE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log the documents instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Also save the run metrics as JSON to this file
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ImportConfig, ImportError> {
        let target = if self.dry_run {
            StoreTarget::DryRun
        } else {
            self.store_target()?
        };
        let mut config = ImportConfig::new(self.input, target);
        config.collection = self.collection;
        config.metrics_out = self.metrics_out;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "firestore")]
    fn store_target(&self) -> Result<StoreTarget, ImportError> {
        let project_id = self.project_id.clone().ok_or_else(|| {
            ImportError::Config("--project-id (or FIRESTORE_PROJECT_ID) is required".into())
        })?;
        Ok(StoreTarget::Firestore(FirestoreConfig {
            project_id,
            database: self.database.clone(),
            access_token: self.access_token.clone(),
            emulator_host: self.emulator_host.clone(),
            timeout_secs: self.timeout_secs,
        }))
    }

    #[cfg(not(feature = "firestore"))]
    fn store_target(&self) -> Result<StoreTarget, ImportError> {
        Err(ImportError::Config(
            "built without the `firestore` feature; only --dry-run is available".into(),
        ))
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn import_with<S: DocumentStore>(store: S, config: &ImportConfig) -> Result<()> {
    let emitter = RecordEmitter::new(store, config.collection.clone());
    let metrics = run_import(&config.input, &emitter)?;
    metrics.print();
    if let Some(path) = &config.metrics_out {
        metrics
            .save_to_file(path)
            .with_context(|| format!("save metrics to {}", path.display()))?;
        info!("metrics written to {}", path.display());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    match &config.target {
        StoreTarget::DryRun => {
            info!("Dry run: no documents will be written.");
            import_with(DryRunStore::new(), &config)
        }
        #[cfg(feature = "firestore")]
        StoreTarget::Firestore(fs) => {
            let store =
                FirestoreStore::connect(fs.clone()).map_err(ImportError::SessionUnavailable)?;
            info!(
                project = %fs.project_id,
                database = %fs.database,
                emulator = fs.emulator_host.is_some(),
                "Firestore session ready."
            );
            import_with(store, &config)
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}
