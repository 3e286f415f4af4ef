mod logging;

use std::path::PathBuf;

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    coastal_config::CoastalConfig,
    coastal_geo::{GoogleGeocoder, ReverseGeocoder, SkipGeocoding},
    coastal_memory::MemoryStatus,
    tracing::{info, warn},
};

#[derive(Parser, Debug)]
#[command(name = "coastal", version, about = "Ask questions about your files, and map cities to the coast")]
struct Cli {
    /// Path to a coastal.toml (defaults to discovery).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Add state and nearest-coast columns to a city CSV.
    Enrich {
        #[arg(long, default_value = "./Cities.csv")]
        input: PathBuf,
        #[arg(long, default_value = "indian_cities_with_state_and_coast_data.csv")]
        output: PathBuf,
    },
    /// Show what the vector store holds.
    Status,
    /// Drop every embedded fragment of one file.
    Forget {
        /// File path the fragments were embedded under.
        file_path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.json_logs);

    let mut config = coastal_config::load_layered(cli.config.as_deref())?;
    if let Command::Serve { host, port } = &cli.command {
        apply_serve_overrides(&mut config, host.clone(), *port);
    }
    coastal_config::check(&config)?;

    match cli.command {
        Command::Serve { .. } => coastal_gateway::serve(&config).await,
        Command::Enrich { input, output } => enrich(&config, input, output).await,
        Command::Status => {
            let status = store_status(&config).await?;
            info!(
                sources = status.total_sources,
                fragments = status.total_fragments,
                model = %status.embedding_model,
                "vector store status"
            );
            Ok(())
        },
        Command::Forget { file_path } => {
            let removed = forget(&config, &file_path).await?;
            info!(path = %file_path, removed, "forgot file");
            Ok(())
        },
    }
}

async fn store_status(config: &CoastalConfig) -> anyhow::Result<MemoryStatus> {
    let state = coastal_gateway::prepare_gateway(config).await?;
    Ok(state.rag.memory().status().await?)
}

async fn forget(config: &CoastalConfig, file_path: &str) -> anyhow::Result<u64> {
    let state = coastal_gateway::prepare_gateway(config).await?;
    Ok(state.rag.memory().forget(file_path).await?)
}

fn apply_serve_overrides(config: &mut CoastalConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}

async fn enrich(config: &CoastalConfig, input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let geocoder: Box<dyn ReverseGeocoder> = match &config.geocoding.api_key {
        Some(key) => Box::new(GoogleGeocoder::new(&config.geocoding.base_url, key.clone())?),
        None => {
            warn!("no geocoding API key configured, State column will be empty");
            Box::new(SkipGeocoding)
        },
    };

    info!(input = %input.display(), output = %output.display(), "enriching cities");
    let report = coastal_geo::enrich_cities(&input, &output, geocoder.as_ref())
        .await
        .with_context(|| format!("enriching {}", input.display()))?;
    info!(
        rows = report.rows,
        geocoded = report.geocoded,
        failed = report.geocode_failed,
        skipped = report.skipped,
        "dataset saved as {}",
        output.display()
    );
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, clap::CommandFactory};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn enrich_defaults() {
        let cli = Cli::try_parse_from(["coastal", "enrich"]).unwrap();
        match cli.command {
            Command::Enrich { input, output } => {
                assert_eq!(input, PathBuf::from("./Cities.csv"));
                assert_eq!(
                    output,
                    PathBuf::from("indian_cities_with_state_and_coast_data.csv")
                );
            },
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, "info");
        assert!(!cli.json_logs);
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from([
            "coastal",
            "serve",
            "--port",
            "9000",
            "--config",
            "/etc/coastal.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/coastal.toml")));

        let Command::Serve { host, port } = cli.command else {
            panic!("expected serve");
        };
        let mut config = CoastalConfig::default();
        apply_serve_overrides(&mut config, host, port);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn port_zero_from_flag_fails_validation() {
        let mut config = CoastalConfig::default();
        apply_serve_overrides(&mut config, None, Some(0));
        let err = coastal_config::check(&config).unwrap_err();
        assert!(err.to_string().contains("server.port"), "{err}");
    }

    #[test]
    fn forget_takes_a_path() {
        let cli = Cli::try_parse_from(["coastal", "forget", "/data/Cities.csv"]).unwrap();
        let Command::Forget { file_path } = cli.command else {
            panic!("expected forget");
        };
        assert_eq!(file_path, "/data/Cities.csv");
    }

    #[tokio::test]
    async fn status_and_forget_on_fresh_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = CoastalConfig::default();
        config.store.db_path = tmp.path().join("coastal.db");

        let status = store_status(&config).await.unwrap();
        assert_eq!(status.total_sources, 0);
        assert_eq!(status.total_fragments, 0);
        assert_eq!(status.embedding_model, "all-minilm");

        assert_eq!(forget(&config, "/data/Cities.csv").await.unwrap(), 0);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["coastal", "serve", "--port", "99999"]).is_err());
    }
}
