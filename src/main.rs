//! Backup power analysis entry point: CLI wiring and config-driven engine run.

mod cli;

use std::process;

use backup_power_sim::config::ScenarioConfig;
use backup_power_sim::io::export::export_all;
use backup_power_sim::sim::engine::Engine;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn load_scenario(args: &Args) -> Result<ScenarioConfig, String> {
    let scenario = if let Some(ref path) = args.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = args.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    scenario.map_err(|e| e.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    let args = Args::parse();

    let scenario = load_scenario(&args).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    let report = match Engine::from_config(&scenario).and_then(|engine| engine.run()) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }

    if let Some(ref dir) = args.export_dir {
        match export_all(&report, dir) {
            Ok(paths) => {
                for p in paths {
                    info!(path = %p.display(), "exported");
                }
            }
            Err(e) => {
                error!("failed to write CSV: {e}");
                process::exit(1);
            }
        }
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(backup_power_sim::api::AppState { report });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(backup_power_sim::api::serve(state, addr)) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}
