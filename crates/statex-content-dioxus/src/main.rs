use dioxus::prelude::*;
use statex_content_engine::io;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use statex_content_config::Config;
use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("statex-content starting up");

    let config_path = Config::config_path();
    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "statex-content-dioxus".to_string());

    let loaded = match Config::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Config::load() failed: {e}");
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    // An explicit directory wins over the configured one, other settings still apply
    let (config, from_config) = match (args.len(), loaded) {
        (2, Some(mut config)) => {
            config.articles_path = PathBuf::from(&args[1]);
            (config, false)
        }
        (2, None) => (Config::new(PathBuf::from(&args[1])), false),
        (1, Some(config)) => (config, true),
        (1, None) => {
            eprintln!("Error: No articles path provided and no config file found");
            eprintln!("Usage: {program_name} <articles-folder-path>");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {program_name} [articles-folder-path]");
            process::exit(1);
        }
    };

    log::info!("Using articles path: {}", config.articles_path.display());

    if let Err(e) = io::validate_articles_dir(&config.articles_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Articles path '{}'{} is invalid: {e}",
            config.articles_path.display(),
            source
        );
        process::exit(1);
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(config)
        .launch(app_root);
}

fn app_root() -> Element {
    let config = use_context::<Config>();
    log::info!(
        "app_root() creating App component with path: {}",
        config.articles_path.display()
    );

    rsx! {
        App { config }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("statex-content")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
