pub mod engine;
pub mod mode;
pub mod round;
pub mod selection;
pub mod setup;

// Re-export the main types for convenience
pub use engine::{Effects, Engine, Intent, Phase, RoundView};
pub use mode::{GameMode, RoundLength, TimerRules};
pub use round::{EndReason, Round, RoundSummary, Sampler};
pub use selection::CategorySelection;
pub use setup::Configuration;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordRepository;
    use crate::draw::{DrawRequest, Drawer, ScriptedDrawer};

    fn play(engine: &mut Engine, drawer: &mut dyn Drawer, mut pending: Option<DrawRequest>) {
        while let Some(request) = pending.take() {
            pending = engine.on_draw(request.resolve_with(drawer)).draw;
        }
    }

    #[test]
    fn test_animals_scenario_time_runs_out() {
        let repo = WordRepository::from_categories("t", [("Animals", vec!["Cat", "Dog"])]).unwrap();
        let mut engine = Engine::new(repo);
        let mut drawer = ScriptedDrawer::new([1]);

        let _ = engine.dispatch(Intent::ToggleCategory("Animals".into()));
        let _ = engine.dispatch(Intent::SetMode(GameMode::TimedWord));
        let effects = engine.dispatch(Intent::InitializeGameState);
        assert_eq!(engine.round().unwrap().pool(), &["Cat", "Dog"]);
        play(&mut engine, &mut drawer, effects.draw);

        assert_eq!(engine.round_view().current_word, Some("Cat"));
        assert_eq!(engine.round_view().remaining_seconds, Some(10));

        for _ in 0..10 {
            engine.tick();
        }
        assert!(!engine.is_active());
        assert!(!engine.in_round());
        assert_eq!(engine.last_round().unwrap().reason, EndReason::TimeUp);
    }

    #[test]
    fn test_animals_scenario_tap_shows_last_word_and_resets_timer() {
        let repo = WordRepository::from_categories("t", [("Animals", vec!["Cat", "Dog"])]).unwrap();
        let mut engine = Engine::new(repo);
        let mut drawer = ScriptedDrawer::new([1, 1]);

        let _ = engine.dispatch(Intent::ToggleCategory("Animals".into()));
        let _ = engine.dispatch(Intent::SetMode(GameMode::TimedWord));
        let effects = engine.dispatch(Intent::InitializeGameState);
        play(&mut engine, &mut drawer, effects.draw);

        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(engine.round_view().remaining_seconds, Some(7));

        let effects = engine.dispatch(Intent::AdvanceWord);
        assert_eq!(effects.draw.map(|r| r.upper.get()), Some(1));
        play(&mut engine, &mut drawer, effects.draw);

        let view = engine.round_view();
        assert_eq!(view.current_word, Some("Dog"));
        assert_eq!(view.remaining_seconds, Some(10));
        assert_eq!(view.seen_words, vec!["Dog", "Cat"]);
    }
}
