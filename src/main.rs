use clap::Parser;
use evo_habitat::config::Config;
use evo_habitat::creature::genome::GeneId;
use evo_habitat::server;
use evo_habitat::simulation::SimulationState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};

#[derive(Parser, Debug)]
#[command(name = "evo-habitat")]
#[command(about = "Evolving ecosystem on a toroidal tile grid", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// JSON map file; overrides `world.map_path`
    #[arg(short, long)]
    map: Option<String>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many ticks as fast as possible, then exit
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Feeding gene given to spawned creatures, e.g. HERBIVORE
    #[arg(long)]
    feeding_gene: Option<GeneId>,

    /// Movement gene given to spawned creatures, e.g. LEGS
    #[arg(long)]
    movement_gene: Option<GeneId>,

    #[arg(long)]
    no_server: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        log::info!("Loading config from: {}", args.config);
        Config::load_from_file(&args.config)?
    } else {
        log::info!("Config file not found, using defaults and saving to: {}", args.config);
        let config = Config::default();
        config.save_to_file(&args.config)?;
        config
    };

    if args.map.is_some() {
        config.world.map_path = args.map;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.feeding_gene.is_some() {
        config.population.feeding_gene = args.feeding_gene;
    }
    if args.movement_gene.is_some() {
        config.population.movement_gene = args.movement_gene;
    }

    log::info!("Initializing simulation...");
    let state = SimulationState::new(config.clone())?;
    log::info!(
        "World {}x{} ready{}",
        state.world.width(),
        state.world.height(),
        config
            .simulation
            .seed
            .map(|seed| format!(", seed {}", seed))
            .unwrap_or_default()
    );

    if let Some(ticks) = args.ticks {
        return run_headless(state, ticks, config.simulation.log_interval_ticks);
    }

    let state = Arc::new(RwLock::new(state));

    if !args.no_server && config.server.enabled {
        let server_state = state.clone();
        let server_config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = server::run_server(server_config, server_state).await {
                log::error!("Server error: {}", e);
            }
        });
        log::info!("WebSocket server started on {}:{}", config.server.address, config.server.port);
    }

    run_simulation(state, config).await
}

fn log_metrics(state: &SimulationState) {
    let metrics = state.metrics();
    log::info!(
        "Tick: {} | Population: {} (H {} / C {} / S {}) | Avg Energy: {:.2} | Max Gen: {} | Plants: {:.0} | Carrion: {:.0}",
        metrics.tick,
        metrics.population,
        metrics.herbivores,
        metrics.carnivores,
        metrics.scavengers,
        metrics.avg_energy,
        metrics.max_generation,
        metrics.total_food.plant,
        metrics.total_food.carrion
    );
}

fn run_headless(
    mut state: SimulationState,
    ticks: u64,
    log_interval: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..ticks {
        state.process_turn()?;
        if log_interval > 0 && state.tick % log_interval == 0 {
            log_metrics(&state);
        }
    }
    log_metrics(&state);
    Ok(())
}

async fn run_simulation(
    state: Arc<RwLock<SimulationState>>,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_duration = Duration::from_millis(1000 / config.simulation.ticks_per_second.max(1));
    let mut tick_interval = interval(tick_duration);
    let log_interval = config.simulation.log_interval_ticks;

    loop {
        tick_interval.tick().await;

        let mut sim_state = state.write().await;
        if let Err(e) = sim_state.process_turn() {
            log::error!("Tick {} failed: {}", sim_state.tick, e);
            return Err(e.into());
        }

        if log_interval > 0 && sim_state.tick % log_interval == 0 {
            log_metrics(&sim_state);
        }
    }
}
