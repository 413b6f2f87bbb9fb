use anyhow::{Context, Result, anyhow, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use statex_content_config::Config;
use statex_content_engine::{ArticleFile, CollapsedSet, DocumentSource, io, render};
use std::io::{Stdout, stdout};
use std::path::Path;
use std::{env, process};

mod app;
mod args;

use app::{App, ui};
use args::{Args, usage};

/// An article picked from the command line or the configured directory.
struct OpenedArticle {
    config: Config,
    file: ArticleFile,
    source: DocumentSource,
}

fn open_article_path(path: &Path) -> Result<OpenedArticle> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Not a file path: {}", path.display()))?;
    let file = ArticleFile::from_relative_str(file_name).ok_or_else(|| {
        anyhow!(
            "Not an article file (expected .html, .htm or .json): {}",
            path.display()
        )
    })?;
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => env::current_dir()?,
    };

    // Settings still come from the config file when there is one
    let config = match Config::load() {
        Ok(Some(mut config)) => {
            config.articles_path = root.clone();
            config
        }
        Ok(None) => Config::new(root.clone()),
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            Config::new(root.clone())
        }
    };

    let source = io::read_article(&file, &root)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(OpenedArticle {
        config,
        file,
        source,
    })
}

fn open_first_configured_article() -> Result<OpenedArticle> {
    let Some(config) = Config::load()? else {
        bail!(
            "No article provided and no config file found at {}",
            Config::config_path().display()
        );
    };

    io::validate_articles_dir(&config.articles_path).with_context(|| {
        format!(
            "Articles path '{}' from config file '{}' is invalid",
            config.articles_path.display(),
            Config::config_path().display()
        )
    })?;

    let file = io::scan_article_files(&config.articles_path)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No articles found in {}", config.articles_path.display()))?;
    log::info!("Opening first configured article {}", file.relative_path());

    let source = io::read_article(&file, &config.articles_path)?;
    Ok(OpenedArticle {
        config,
        file,
        source,
    })
}

fn main() -> Result<()> {
    // The TUI owns the terminal, so only warnings and worse by default
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let program_name = env::args()
        .next()
        .unwrap_or_else(|| "statex-content-cli".to_string());

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(&program_name));
            process::exit(1);
        }
    };

    let opened = match &args.article {
        Some(path) => open_article_path(path),
        None => open_first_configured_article(),
    };
    let OpenedArticle {
        config,
        file,
        source,
    } = match opened {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{}", usage(&program_name));
            process::exit(1);
        }
    };

    let blocks = config
        .sectionizer()
        .sectionize(source, config.fallback_title_for(file.display_name()));
    let collapsed = CollapsedSet::initial(&blocks, config.initially_collapsed || args.collapsed);

    if args.outline {
        println!("{}", render::outline(&blocks, &collapsed));
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(file.display_name().to_string(), blocks, collapsed);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                KeyCode::Right | KeyCode::Char('l') => app.expand_selected(),
                KeyCode::Left | KeyCode::Char('h') => app.collapse_selected(),
                _ => {}
            }
        }
    }
}
