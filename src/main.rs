use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use wordrush::{
    app::App,
    app_dirs::AppDirs,
    catalog::WordRepository,
    config::{Config, ConfigStore, FileConfigStore},
    draw::{DrawService, Drawer, SeededDrawer, ThreadRngDrawer},
    game::{GameMode, Sampler},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEventSource, Runner},
    ui,
};

/// fast-paced terminal word game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A party word game for the terminal. Pick one or more categories, choose a timed mode and call out words until the clock runs out. Words never repeat within a round."
)]
pub struct Cli {
    /// game mode to preselect
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// round length in seconds (overrides the mode's default)
    #[clap(short = 's', long)]
    length: Option<u32>,

    /// category to preselect, repeatable
    #[clap(short = 'c', long = "category")]
    categories: Vec<String>,

    /// JSON word catalog to use instead of the bundled one
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// seed for reproducible word order
    #[clap(long)]
    seed: Option<u64>,

    /// how a fresh word is picked from the unseen ones
    #[clap(long, value_enum)]
    sampler: Option<Sampler>,

    /// read startup defaults from this file
    #[clap(long)]
    config: Option<PathBuf>,

    /// print the catalog's categories and exit
    #[clap(long)]
    list: bool,
}

impl Cli {
    /// Flags win over the config file; categories given on the command line
    /// replace the configured ones.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(mode) = self.mode {
            config.mode = Some(mode);
        }
        if let Some(length) = self.length {
            config.round_length = Some(length);
        }
        if !self.categories.is_empty() {
            config.categories = self.categories.clone();
        }
        if let Some(words) = &self.words {
            config.words = Some(words.clone());
        }
        if let Some(sampler) = self.sampler {
            config.sampler = sampler;
        }
        config
    }

    fn drawer(&self) -> Box<dyn Drawer> {
        match self.seed {
            Some(seed) => Box::new(SeededDrawer::new(seed)),
            None => Box::new(ThreadRngDrawer),
        }
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = AppDirs::log_dir().and_then(|dir| logging::init(&dir));

    let config = cli.apply(cli.config_store().load());
    let repo = WordRepository::load(config.words.as_deref())?;

    if cli.list {
        print_categories(&repo);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::from_config(repo, &config)?;
    tracing::info!(catalog = app.engine.repository().name(), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, cli.drawer());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn print_categories(repo: &WordRepository) {
    println!("{}", repo.name());
    for category in repo.categories() {
        println!("  {:<16}{} words", category.name, category.words.len());
    }
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    drawer: Box<dyn Drawer>,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let draws = DrawService::spawn(drawer, events.sender());
    let mut runner = Runner::new(events, FixedTicker::seconds());

    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        let effects = app.handle_event(runner.step());

        if effects.restart_clock {
            runner.rearm();
        }
        if let Some(request) = effects.draw {
            if !draws.submit(request) {
                return Err("draw service stopped".into());
            }
        }

        terminal.draw(|f| ui::draw(app, f))?;
    }

    tracing::info!("quitting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordrush::game::TimerRules;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wordrush"]);

        assert_eq!(cli.mode, None);
        assert_eq!(cli.length, None);
        assert!(cli.categories.is_empty());
        assert_eq!(cli.seed, None);
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_parses_presets() {
        let cli = Cli::parse_from([
            "wordrush",
            "-m",
            "timed-word",
            "-s",
            "15",
            "-c",
            "Animals",
            "--category",
            "Food",
            "--seed",
            "7",
            "--sampler",
            "rejection",
        ]);

        assert_eq!(cli.mode, Some(GameMode::TimedWord));
        assert_eq!(cli.length, Some(15));
        assert_eq!(cli.categories, vec!["Animals", "Food"]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.sampler, Some(Sampler::Rejection));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["wordrush", "--mode", "sudden-death"]).is_err());
    }

    #[test]
    fn test_apply_layers_over_config() {
        let config = Config {
            mode: Some(GameMode::TimedRound),
            round_length: Some(90),
            categories: vec!["Jobs".into()],
            sampler: Sampler::Rejection,
            timer_rules: TimerRules {
                timed_round_resets: true,
                timed_word_resets: true,
            },
            ..Config::default()
        };

        let cli = Cli::parse_from(["wordrush", "-c", "Food", "-c", "Sports"]);
        let merged = cli.apply(config.clone());

        assert_eq!(merged.mode, Some(GameMode::TimedRound));
        assert_eq!(merged.round_length, Some(90));
        assert_eq!(merged.categories, vec!["Food", "Sports"]);
        assert_eq!(merged.sampler, Sampler::Rejection);
        assert_eq!(merged.timer_rules, config.timer_rules);

        let untouched = Cli::parse_from(["wordrush"]).apply(config.clone());
        assert_eq!(untouched, config);
    }

    #[test]
    fn test_bundled_catalog_presets_start_a_round() {
        let cli = Cli::parse_from(["wordrush", "-m", "timed-round", "-c", "Animals"]);
        let config = cli.apply(Config::default());
        let repo = WordRepository::load(config.words.as_deref()).unwrap();

        let app = App::from_config(repo, &config).unwrap();
        assert!(app.engine.can_start());
    }
}
