use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::catalog::WordRepository;
use crate::config::Config;
use crate::draw::DrawOutcome;
use crate::error::{Error, Result};
use crate::game::{Effects, Engine, GameMode, Intent};
use crate::runtime::GameEvent;

/// Engine plus the bits of screen state that only matter for input routing.
#[derive(Debug)]
pub struct App {
    pub engine: Engine,
    pub category_cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            category_cursor: 0,
            should_quit: false,
        }
    }

    /// Build the engine from startup settings and preselect what they ask for.
    pub fn from_config(repo: WordRepository, config: &Config) -> Result<Self> {
        if let Some(unknown) = config.categories.iter().find(|c| !repo.contains(c)) {
            return Err(Error::UnknownCategory(unknown.clone()));
        }

        let mut engine = Engine::with_rules(repo, config.timer_rules, config.sampler);
        // mode first: picking a mode overwrites the length
        if let Some(mode) = config.mode {
            let _ = engine.dispatch(Intent::SetMode(mode));
        }
        if let Some(secs) = config.round_length {
            let _ = engine.dispatch(Intent::SetRoundLength(secs.to_string()));
        }
        for category in &config.categories {
            // a name listed twice must not toggle itself back off
            if !engine.selection().contains(category) {
                let _ = engine.dispatch(Intent::ToggleCategory(category.clone()));
            }
        }

        Ok(Self::new(engine))
    }

    /// Round length as the text field shows it.
    pub fn length_text(&self) -> String {
        self.engine
            .configuration()
            .round_length
            .map(|l| l.secs().to_string())
            .unwrap_or_default()
    }

    pub fn category_at_cursor(&self) -> Option<&str> {
        self.engine
            .repository()
            .category_names()
            .nth(self.category_cursor)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Effects {
        if key.kind == KeyEventKind::Release {
            return Effects::default();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Effects::default();
        }

        if self.engine.in_round() {
            self.on_round_key(key)
        } else if self.engine.category_panel_open() {
            self.on_panel_key(key)
        } else {
            self.on_setup_key(key)
        }
    }

    fn on_round_key(&mut self, key: KeyEvent) -> Effects {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => {
                self.engine.dispatch(Intent::AdvanceWord)
            }
            KeyCode::Esc => self.engine.dispatch(Intent::EndRound),
            _ => Effects::default(),
        }
    }

    fn on_panel_key(&mut self, key: KeyEvent) -> Effects {
        let categories = self.engine.repository().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.category_cursor = self.category_cursor.saturating_sub(1);
                Effects::default()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.category_cursor + 1 < categories {
                    self.category_cursor += 1;
                }
                Effects::default()
            }
            KeyCode::Char(' ') | KeyCode::Enter => match self.category_at_cursor() {
                Some(name) => {
                    let name = name.to_string();
                    self.engine.dispatch(Intent::ToggleCategory(name))
                }
                None => Effects::default(),
            },
            KeyCode::Tab | KeyCode::Esc => self.engine.dispatch(Intent::ToggleCategoryPanel(false)),
            _ => Effects::default(),
        }
    }

    fn on_setup_key(&mut self, key: KeyEvent) -> Effects {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                let mode = match (self.engine.configuration().mode, key.code) {
                    (None, _) => GameMode::TimedRound,
                    (Some(mode), KeyCode::Left) => mode.previous(),
                    (Some(mode), _) => mode.next(),
                };
                self.engine.dispatch(Intent::SetMode(mode))
            }
            KeyCode::Backspace => {
                let mut text = self.length_text();
                text.pop();
                self.engine.dispatch(Intent::SetRoundLength(text))
            }
            KeyCode::Char(c) => {
                let mut text = self.length_text();
                text.push(c);
                self.engine.dispatch(Intent::SetRoundLength(text))
            }
            KeyCode::Tab => self.engine.dispatch(Intent::ToggleCategoryPanel(true)),
            KeyCode::Enter => self.engine.dispatch(Intent::InitializeGameState),
            KeyCode::Esc => {
                self.should_quit = true;
                Effects::default()
            }
            _ => Effects::default(),
        }
    }

    /// A left click is a tap on the word card.
    pub fn on_mouse(&mut self, mouse: MouseEvent) -> Effects {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.engine.in_round() => {
                self.engine.dispatch(Intent::AdvanceWord)
            }
            _ => Effects::default(),
        }
    }

    pub fn on_tick(&mut self) {
        self.engine.tick();
    }

    /// Route one runtime event to the matching handler.
    pub fn handle_event(&mut self, event: GameEvent) -> Effects {
        match event {
            GameEvent::Key(key) => self.on_key(key),
            GameEvent::Mouse(mouse) => self.on_mouse(mouse),
            GameEvent::Drawn(outcome) => self.on_draw(outcome),
            GameEvent::Tick => {
                self.on_tick();
                Effects::default()
            }
            GameEvent::Resize => Effects::default(),
        }
    }

    pub fn on_draw(&mut self, outcome: DrawOutcome) -> Effects {
        self.engine.on_draw(outcome)
    }
}
