use std::{
    io,
    path::PathBuf,
    process::ExitCode,
};

use clap::{
    Parser,
    Subcommand,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use vokabel::{
    core::LocalClock,
    logging,
    persistence::{
        get_app_data_dir,
        FileKeyValueStore,
    },
    settings::DEFAULT_LOG_LEVEL,
    terminal,
    Catalog,
    Clock,
    DrillSession,
    ProgressStore,
    Settings,
    VokabelError,
};

#[derive(Debug, Parser)]
#[command(name = "vokabel", version, about = "Drill vocabulary with example sentences")]
struct Cli {
    /// Where progress and settings are kept
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Overrides the log level from settings.json
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive drill
    Drill {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show review statistics for a catalog
    Stats {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Delete all stored progress
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Print the effective settings
    Settings {
        /// Write the effective settings to settings.json
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(get_app_data_dir);
    let loaded = Settings::load(&data_dir);

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|settings| settings.log_level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    logging::init_tracing(&log_level);

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}. Using defaults.", e);
        Settings::default()
    });

    match run(cli.command, data_dir, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, data_dir: PathBuf, settings: Settings) -> Result<(), VokabelError> {
    match command {
        Command::Drill { catalog } => {
            let catalog = load_catalog(catalog, &settings)?;
            let store = ProgressStore::new(FileKeyValueStore::open(&data_dir));
            let mut session = DrillSession::new(
                catalog,
                store,
                settings.quota_target()?,
                LocalClock,
                StdRng::from_os_rng(),
            );
            let stdin = io::stdin();
            terminal::run_drill(&mut session, stdin.lock(), io::stdout())
        }
        Command::Stats { catalog } => {
            let catalog = load_catalog(catalog, &settings)?;
            let store = ProgressStore::new(FileKeyValueStore::open(&data_dir));
            let stats = store.stats(&catalog, LocalClock.today());
            let quota = settings.quota_target()?.render(stats.correct_today);

            println!("Words in catalog:  {}", catalog.len());
            println!("Words seen:        {}", stats.words_seen);
            println!("Words never seen:  {}", stats.words_unseen);
            println!("Words overdue:     {}", stats.words_overdue);
            println!("Total reviews:     {}", stats.total_reviews);
            println!("Today:             {}", terminal::render_progress_bar(&quota));
            Ok(())
        }
        Command::Reset { yes } => {
            if !yes {
                return Err(VokabelError::Custom(
                    "Refusing to delete progress without --yes".to_string(),
                ));
            }
            if FileKeyValueStore::destroy(&data_dir)? {
                println!("Progress deleted.");
            } else {
                println!("No stored progress found.");
            }
            Ok(())
        }
        Command::Settings { init } => {
            if init {
                settings.quota_target()?;
                settings.save(&data_dir)?;
                println!("Settings written.");
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            println!("Data directory: {}", data_dir.display());
            Ok(())
        }
    }
}

fn load_catalog(path: Option<PathBuf>, settings: &Settings) -> Result<Catalog, VokabelError> {
    let path = path.or_else(|| settings.catalog_path.clone()).ok_or_else(|| {
        VokabelError::Custom(
            "No catalog given; pass --catalog or set catalog_path in settings.json".to_string(),
        )
    })?;
    Catalog::load(&path)
}
