use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use linkpath_session::{script, StartupConfig};

/// Shortest walks over user-activated links
#[derive(Parser, Debug)]
#[command(name = "linkpath")]
#[command(about = "Exhaustive shortest-path search over a spatial link graph", long_about = None)]
struct Args {
    /// [MAX_DEPTH] | MIN_NODES MAX_NODES LINKS_PER_NODE | MAX_DEPTH MIN_NODES MAX_NODES LINKS_PER_NODE
    #[arg(num_args = 0..)]
    values: Vec<usize>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Seed for the random graph
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A malformed argument list stops here, before any state exists
    let config = StartupConfig::from_args(&args.values)?;

    info!("Starting linkpath v{}", env!("CARGO_PKG_VERSION"));
    info!("Max depth: {}", config.max_depth);
    if let Some(random) = &config.random {
        info!(
            "Random graph: {}..={} nodes, {} links per node",
            random.min_nodes, random.max_nodes, random.links_per_node
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let state = config.into_state(&mut rng)?;

    let mut stdout = io::stdout().lock();
    let state = match &args.script {
        Some(path) => {
            info!("Script: {:?}", path);
            script::run(state, BufReader::new(File::open(path)?), &mut stdout)?
        }
        None => script::run(state, io::stdin().lock(), &mut stdout)?,
    };

    info!(
        "Finished with {} nodes, {} active links",
        state.graph().node_count(),
        state.graph().active_links().len()
    );
    Ok(())
}
