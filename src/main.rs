use clap::Parser;
use dialx_core::{DialKey, Dials, Selection, Session, SessionConfig};
use dialx_store::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Pick tracks from a catalog to match a seven-dial target
#[derive(Parser, Debug)]
#[command(name = "dialx")]
#[command(about = "An adaptive dial-matching track recommender", long_about = None)]
struct Args {
    /// Path to the JSON catalog
    #[arg(short, long)]
    catalog: PathBuf,

    /// Target dials: production,craft,groove,sonic_roots,mood,intensity,vibe
    #[arg(short, long, default_value = "5,5,5,5,5,5,5")]
    target: String,

    /// How many tracks to pull
    #[arg(short = 'n', long, default_value_t = 5)]
    count: usize,

    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_target(raw: &str) -> anyhow::Result<Dials> {
    let values: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()?;
    if values.len() != DialKey::COUNT {
        anyhow::bail!(
            "expected {} comma-separated dial values, got {}",
            DialKey::COUNT,
            values.len()
        );
    }

    let mut dials = Dials::default();
    for (key, value) in DialKey::ALL.into_iter().zip(values) {
        dials.set(key, value);
    }
    dials.validate()?;
    Ok(dials)
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
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting dialx v{}", env!("CARGO_PKG_VERSION"));

    let target = parse_target(&args.target)?;
    let store = Arc::new(MemoryStore::load_json(&args.catalog)?);
    info!("Catalog: {} tracks from {:?}", store.len(), args.catalog);

    let config = SessionConfig {
        target,
        ..SessionConfig::default()
    };
    let session = match args.seed {
        Some(seed) => Session::with_rng(store, config, StdRng::seed_from_u64(seed)),
        None => Session::with_config(store, config),
    };

    for n in 1..=args.count {
        match session.select_next(&target)? {
            Selection::Selected {
                track,
                fit,
                tolerance,
            } => {
                println!("{:>3}. {} (fit {}, tolerance {})", n, track.label(), fit, tolerance);
            }
            Selection::Exhausted => {
                println!("You have heard every track matching those dials.");
                break;
            }
            Selection::NoMatch => {
                println!("No track in the catalog matches those dials.");
                break;
            }
        }
    }

    let snapshot = session.snapshot();
    println!(
        "Session: {} shown, pool {}, more available: {}",
        snapshot.seen_count, snapshot.pool_size, snapshot.can_go_forward
    );

    Ok(())
}
