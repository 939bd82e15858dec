use clap::{Parser, Subcommand};
use exercise_core::*;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "extrack")]
#[command(about = "Exercise log REST backend", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override store connection string (memory: or file://<path>)
    #[arg(long, global = true)]
    store: Option<String>,

    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Export stored exercises to CSV
    Export {
        /// Destination CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Only export exercises with this name
        #[arg(long)]
        name: Option<String>,

        /// Only export exercises with this rep count
        #[arg(long)]
        reps: Option<String>,

        /// Only export exercises with this weight
        #[arg(long)]
        weight: Option<String>,

        /// Only export exercises recorded in this unit (lbs, kgs)
        #[arg(long)]
        unit: Option<String>,

        /// Only export exercises on this date (MM-DD-YY)
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    exercise_core::logging::init_for_verbosity(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            Config::load_from(path)?.with_env_overrides(|key| std::env::var(key).ok())?
        }
        None => Config::load()?,
    };
    if let Some(store) = cli.store {
        config.store.url = store;
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Commands::Export {
            output,
            name,
            reps,
            weight,
            unit,
            date,
        }) => {
            let params: HashMap<String, String> = [
                ("name", name),
                ("reps", reps),
                ("weight", weight),
                ("unit", unit),
                ("date", date),
            ]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect();
            cmd_export(&config, &params, &output).await
        }
        None => cmd_serve(config, None, None).await,
    }
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let store = connect(&config.store.url).await?;
    let service = ExerciseService::new(store);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    exercise_server::serve(listener, service).await
}

async fn cmd_export(
    config: &Config,
    params: &HashMap<String, String>,
    output: &std::path::Path,
) -> Result<()> {
    let filter = ExerciseFilter::from_query(params)?;
    let service = ExerciseService::new(connect(&config.store.url).await?);

    let records = service.find_exercises(&filter).await?;
    let count = exercise_core::export::write_csv(&records, output)?;

    println!("✓ Exported {} exercises", count);
    println!("  CSV: {}", output.display());
    Ok(())
}
