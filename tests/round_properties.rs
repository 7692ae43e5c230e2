use std::collections::HashSet;

use proptest::prelude::*;

use wordrush::catalog::WordRepository;
use wordrush::draw::{DrawRequest, Drawer, SeededDrawer};
use wordrush::game::{EndReason, Engine, GameMode, Intent, Sampler, TimerRules};

// Randomised checks of the no-repeat guarantee over arbitrary catalogs and seeds.

fn arb_catalog() -> impl Strategy<Value = Vec<Vec<String>>> {
    // small alphabet on purpose so categories share words
    prop::collection::vec(prop::collection::vec("[a-e]{1,2}", 0..6), 1..4)
}

fn arb_sampler() -> impl Strategy<Value = Sampler> {
    prop_oneof![Just(Sampler::Remaining), Just(Sampler::Rejection)]
}

fn build(catalog: &[Vec<String>], sampler: Sampler) -> Engine {
    let repo = WordRepository::from_categories(
        "prop",
        catalog
            .iter()
            .enumerate()
            .map(|(i, words)| (format!("c{i}"), words.clone())),
    )
    .unwrap();
    let names: Vec<String> = repo.category_names().map(str::to_string).collect();

    let mut engine = Engine::with_rules(repo, TimerRules::default(), sampler);
    let _ = engine.dispatch(Intent::SetMode(GameMode::TimedRound));
    for name in names {
        let _ = engine.dispatch(Intent::ToggleCategory(name));
    }
    engine
}

fn settle(engine: &mut Engine, drawer: &mut dyn Drawer, mut pending: Option<DrawRequest>) {
    while let Some(request) = pending.take() {
        pending = engine.on_draw(request.resolve_with(drawer)).draw;
    }
}

proptest! {
    #[test]
    fn words_never_repeat_and_pool_runs_dry(
        catalog in arb_catalog(),
        sampler in arb_sampler(),
        seed in any::<u64>(),
    ) {
        let mut engine = build(&catalog, sampler);
        let mut drawer = SeededDrawer::new(seed);

        let distinct: HashSet<&str> = catalog.iter().flatten().map(String::as_str).collect();

        let effects = engine.dispatch(Intent::InitializeGameState);
        settle(&mut engine, &mut drawer, effects.draw);

        let mut advances = 0;
        while engine.in_round() {
            let round = engine.round().unwrap();
            prop_assert_eq!(round.pool().len(), distinct.len());
            prop_assert!(round.seen_count() <= round.pool().len());
            prop_assert!(advances <= distinct.len());

            let effects = engine.dispatch(Intent::AdvanceWord);
            settle(&mut engine, &mut drawer, effects.draw);
            advances += 1;
        }

        let summary = engine.last_round().unwrap();
        if distinct.is_empty() {
            prop_assert_eq!(summary.reason, EndReason::EmptyPool);
            prop_assert!(summary.words.is_empty());
        } else {
            prop_assert_eq!(summary.reason, EndReason::PoolExhausted);
            prop_assert_eq!(advances, distinct.len());
        }

        let shown: HashSet<&str> = summary.words.iter().map(String::as_str).collect();
        prop_assert_eq!(shown.len(), summary.words.len());
        prop_assert_eq!(shown, distinct);
    }

    #[test]
    fn toggling_twice_restores_the_selection(
        catalog in arb_catalog(),
        picks in prop::collection::vec(0usize..3, 0..8),
        extra in 0usize..3,
    ) {
        let repo = WordRepository::from_categories(
            "prop",
            catalog
                .iter()
                .enumerate()
                .map(|(i, words)| (format!("c{i}"), words.clone())),
        )
        .unwrap();
        let mut engine = Engine::new(repo);
        for pick in picks {
            let _ = engine.dispatch(Intent::ToggleCategory(format!("c{pick}")));
        }

        let before = engine.selection().clone();
        let _ = engine.dispatch(Intent::ToggleCategory(format!("c{extra}")));
        let _ = engine.dispatch(Intent::ToggleCategory(format!("c{extra}")));
        prop_assert_eq!(engine.selection(), &before);
    }
}
