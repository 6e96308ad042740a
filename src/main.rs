use clap::Parser;
use prompt_queue::cli::{
    handle_classify, handle_export, handle_history, handle_init, handle_pending, handle_run,
    handle_seed, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = cli.base;
    let result = match cli.command {
        Commands::Init => handle_init(base),
        Commands::Run { seed, json } => handle_run(base, seed, json),
        Commands::Pending { json } => handle_pending(base, json),
        Commands::History { topic, json } => handle_history(base, topic, json),
        Commands::Seed => handle_seed(base),
        Commands::Export { out } => handle_export(out),
        Commands::Classify { file, json } => handle_classify(base, file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
