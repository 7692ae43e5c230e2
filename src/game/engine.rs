use tracing::{debug, info, warn};

use super::mode::{GameMode, TimerRules};
use super::round::{DrawStep, EndReason, Round, RoundSummary, Sampler, TickStep};
use super::selection::{CategorySelection, Toggled};
use super::setup::Configuration;
use crate::catalog::WordRepository;
use crate::draw::{DrawOutcome, DrawRequest};

/// Everything the player can ask for from the setup and round screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetMode(GameMode),
    SetRoundLength(String),
    ToggleCategoryPanel(bool),
    ToggleCategory(String),
    InitializeGameState,
    AdvanceWord,
    EndRound,
}

#[derive(Debug)]
pub enum Phase {
    Configuring,
    Round(Round),
}

/// Work the caller has to carry out after the engine handled an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    /// resolve this and feed the result back through [`Engine::on_draw`]
    pub draw: Option<DrawRequest>,
    /// the first word of a round just appeared; count seconds from now
    pub restart_clock: bool,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }

    fn draw(request: DrawRequest) -> Self {
        Self {
            draw: Some(request),
            restart_clock: false,
        }
    }
}

/// The round fields the screen needs, read straight from the phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundView<'a> {
    pub active: bool,
    pub remaining_seconds: Option<u32>,
    pub current_word: Option<&'a str>,
    pub seen_words: Vec<&'a str>,
}

/// The game's state machine.
///
/// Single-threaded and synchronous: every intent, tick and draw result is
/// handled to completion before the next one. Draws are never made here; the
/// engine returns a request in [`Effects`] and waits for the result.
#[derive(Debug)]
pub struct Engine {
    repo: WordRepository,
    rules: TimerRules,
    sampler: Sampler,
    config: Configuration,
    selection: CategorySelection,
    category_panel_open: bool,
    phase: Phase,
    last_round: Option<RoundSummary>,
    rounds_started: u64,
}

impl Engine {
    pub fn new(repo: WordRepository) -> Self {
        Self::with_rules(repo, TimerRules::default(), Sampler::default())
    }

    pub fn with_rules(repo: WordRepository, rules: TimerRules, sampler: Sampler) -> Self {
        Self {
            repo,
            rules,
            sampler,
            config: Configuration::default(),
            selection: CategorySelection::default(),
            category_panel_open: false,
            phase: Phase::Configuring,
            last_round: None,
            rounds_started: 0,
        }
    }

    pub fn repository(&self) -> &WordRepository {
        &self.repo
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn category_panel_open(&self) -> bool {
        self.category_panel_open
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    pub fn timer_rules(&self) -> TimerRules {
        self.rules
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Round(round) => Some(round),
            Phase::Configuring => None,
        }
    }

    pub fn in_round(&self) -> bool {
        matches!(self.phase, Phase::Round(_))
    }

    /// A word is on screen and its countdown is running.
    pub fn is_active(&self) -> bool {
        self.round().is_some_and(Round::is_active)
    }

    /// Mode, length and at least one category are all set, and no round is running.
    pub fn can_start(&self) -> bool {
        !self.in_round() && self.config.complete().is_some() && !self.selection.is_empty()
    }

    pub fn round_view(&self) -> RoundView<'_> {
        match self.round() {
            Some(round) => RoundView {
                active: round.is_active(),
                remaining_seconds: round.remaining_secs(),
                current_word: round.current_word(),
                seen_words: round.seen_words().collect(),
            },
            None => RoundView::default(),
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Effects {
        debug!(?intent, "intent");

        match intent {
            Intent::SetMode(mode) => {
                self.config.set_mode(mode);
                Effects::none()
            }
            Intent::SetRoundLength(text) => {
                if !self.config.set_round_length_text(&text) {
                    debug!(?text, "round length text ignored");
                }
                Effects::none()
            }
            Intent::ToggleCategoryPanel(open) => {
                self.category_panel_open = open;
                Effects::none()
            }
            Intent::ToggleCategory(name) => {
                self.toggle_category(&name);
                Effects::none()
            }
            Intent::InitializeGameState => self.initialize_round(),
            Intent::AdvanceWord => self.advance_word(),
            Intent::EndRound => {
                if self.in_round() {
                    self.finish_round(EndReason::Abandoned);
                }
                Effects::none()
            }
        }
    }

    fn toggle_category(&mut self, name: &str) {
        if self.in_round() {
            warn!(category = name, "category change rejected while a round is running");
            return;
        }

        match self.selection.toggle(&self.repo, name) {
            Toggled::Unknown => warn!(category = name, "unknown category"),
            toggled => debug!(category = name, ?toggled, "category toggled"),
        }
    }

    fn initialize_round(&mut self) -> Effects {
        if self.in_round() {
            debug!("round already running, start ignored");
            return Effects::none();
        }
        let Some((mode, length)) = self.config.complete() else {
            debug!("start ignored, mode or length missing");
            return Effects::none();
        };
        if self.selection.is_empty() {
            debug!("start ignored, no categories selected");
            return Effects::none();
        }

        let pool = self.selection.snapshot_pool(&self.repo);
        self.rounds_started += 1;
        let mut round = Round::new(
            self.rounds_started,
            mode,
            length,
            self.sampler,
            self.rules.resets_on_new_word(mode),
            pool,
        );
        info!(
            round = round.id(),
            %mode,
            length = length.secs(),
            pool = round.pool().len(),
            "round initialized"
        );

        self.last_round = None;
        match round.request_draw() {
            Some(request) => {
                self.phase = Phase::Round(round);
                Effects::draw(request)
            }
            None => {
                self.phase = Phase::Round(round);
                self.finish_round(EndReason::EmptyPool);
                Effects::none()
            }
        }
    }

    fn advance_word(&mut self) -> Effects {
        let Phase::Round(round) = &mut self.phase else {
            return Effects::none();
        };
        if !round.is_active() || round.draw_in_flight() {
            debug!("advance ignored");
            return Effects::none();
        }

        match round.request_draw() {
            Some(request) => Effects::draw(request),
            None => {
                self.finish_round(EndReason::PoolExhausted);
                Effects::none()
            }
        }
    }

    /// One wall-clock second has passed.
    pub fn tick(&mut self) {
        let Phase::Round(round) = &mut self.phase else {
            return;
        };

        match round.tick() {
            TickStep::Idle => {}
            TickStep::Counted(left) => debug!(left, "tick"),
            TickStep::Expired => self.finish_round(EndReason::TimeUp),
        }
    }

    pub fn on_draw(&mut self, outcome: DrawOutcome) -> Effects {
        let Phase::Round(round) = &mut self.phase else {
            debug!(?outcome, "draw result after the round ended");
            return Effects::none();
        };

        match round.resolve(outcome) {
            DrawStep::Show { first } => {
                debug!(word = ?round.current_word(), "word shown");
                Effects {
                    draw: None,
                    restart_clock: first,
                }
            }
            DrawStep::Retry(request) => Effects::draw(request),
            DrawStep::Exhausted => {
                self.finish_round(EndReason::PoolExhausted);
                Effects::none()
            }
            DrawStep::Stale => {
                debug!(?outcome, "stale draw result ignored");
                Effects::none()
            }
        }
    }

    fn finish_round(&mut self, reason: EndReason) {
        let phase = std::mem::replace(&mut self.phase, Phase::Configuring);
        if let Phase::Round(round) = phase {
            info!(
                round = round.id(),
                ?reason,
                words = round.seen_count(),
                "round over"
            );
            self.last_round = Some(round.into_summary(reason));
        }
    }
}
