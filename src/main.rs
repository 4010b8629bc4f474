use clap::{Parser, Subcommand};
use meteo::Config;

/// Meteo - weather records API
#[derive(Parser)]
#[command(name = "meteo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Apply migrations and insert the sample dataset
    Seed,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load()?;
    meteo::init_tracing(&config);

    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => runtime.block_on(meteo::serve(config)),
        Commands::Seed => runtime.block_on(meteo::seed(config)),
    }
}
