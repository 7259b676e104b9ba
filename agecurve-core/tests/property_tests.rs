//! Property tests for chart and ranking invariants.
//!
//! Uses proptest to verify:
//! 1. Dynamic axis — every finite value lies inside, bounds sit on the grid
//! 2. Player chart — every plotted value lies inside the y-axis
//! 3. Rankings — bounded, sign-split, sorted, and truly the top deltas
//! 4. Search — a hit always contains the query

use agecurve_core::chart::{dynamic_axis, PlayerPlotter};
use agecurve_core::domain::{AgingCurve, AgingCurvePoint, Backtest, PlayerRecord, SeasonPoint};
use agecurve_core::ranking::{outlier_delta, rank_outliers, PredictionPolicy, RankingConfig};
use agecurve_core::search::SearchMode;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_index() -> impl Strategy<Value = f64> {
    (0u32..300).prop_map(f64::from)
}

fn arb_player(i: usize) -> impl Strategy<Value = PlayerRecord> {
    (
        proptest::collection::vec(arb_index(), 0..4),
        proptest::collection::vec(arb_index(), 0..3),
        proptest::option::of((arb_index(), arb_index())),
    )
        .prop_map(move |(history, forecast, backtest)| {
            let history: Vec<SeasonPoint> = history
                .into_iter()
                .enumerate()
                .map(|(k, v)| SeasonPoint {
                    age: 24 + k as u32,
                    performance_index: v,
                })
                .collect();
            let first_forecast_age = 24 + history.len() as u32;
            let forecast = forecast
                .into_iter()
                .enumerate()
                .map(|(k, v)| SeasonPoint {
                    age: first_forecast_age + k as u32,
                    performance_index: v,
                })
                .collect();
            let backtest = backtest.map(|(expected, actual)| Backtest {
                age: 30,
                expected_index: expected,
                actual_index: actual,
            });
            PlayerRecord {
                name: format!("Player {i:02}"),
                history,
                forecast,
                backtest,
            }
        })
}

fn arb_roster() -> impl Strategy<Value = Vec<PlayerRecord>> {
    (0usize..12).prop_flat_map(|n| (0..n).map(arb_player).collect::<Vec<_>>())
}

fn flat_curve() -> AgingCurve {
    AgingCurve::from_points(
        (20..=40)
            .map(|age| AgingCurvePoint { age, age_factor: 1.0 })
            .collect(),
    )
}

// ── 1. Dynamic Axis ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn dynamic_axis_contains_every_value(
        values in proptest::collection::vec(arb_index(), 1..20),
        step in prop_oneof![Just(5.0), Just(10.0), Just(25.0)],
        padding in prop_oneof![Just(0.0), Just(10.0)],
    ) {
        let axis = dynamic_axis(values.iter().copied(), step, padding);
        for v in &values {
            prop_assert!(axis.min <= *v - padding && *v + padding <= axis.max);
        }
        let grid_lo = (axis.min + padding) / step;
        let grid_hi = (axis.max - padding) / step;
        prop_assert!((grid_lo - grid_lo.round()).abs() < 1e-9);
        prop_assert!((grid_hi - grid_hi.round()).abs() < 1e-9);
    }
}

// ── 2. Player Chart ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_series_fits_the_y_axis(player in arb_player(0)) {
        let spec = PlayerPlotter::default().plot(&player, &flat_curve());
        for series in &spec.series {
            for (x, y) in &series.points {
                prop_assert!(spec.y_axis.contains(*y), "{} outside {:?}", y, spec.y_axis);
                prop_assert!(spec.x_axis.contains(*x));
            }
        }
    }
}

// ── 3. Rankings ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rankings_are_bounded_sorted_and_signed(
        roster in arb_roster(),
        top_n in 1usize..6,
    ) {
        let config = RankingConfig { top_n, prediction: PredictionPolicy::PreferBacktest };
        let rankings = rank_outliers(&roster, &config);

        prop_assert!(rankings.over.len() <= top_n);
        prop_assert!(rankings.under.len() <= top_n);
        prop_assert!(rankings.over.iter().all(|e| e.delta > 0.0));
        prop_assert!(rankings.under.iter().all(|e| e.delta < 0.0));
        for w in rankings.over.windows(2) {
            prop_assert!(w[0].delta >= w[1].delta);
        }
        for w in rankings.under.windows(2) {
            prop_assert!(w[0].delta <= w[1].delta);
        }

        // nothing left out beats the weakest entry kept
        if rankings.over.len() == top_n {
            let floor = rankings.over[top_n - 1].delta;
            let kept: Vec<usize> = rankings.over.iter().map(|e| e.player_index).collect();
            for (i, p) in roster.iter().enumerate() {
                if kept.contains(&i) {
                    continue;
                }
                if let Some(d) = outlier_delta(p, config.prediction) {
                    prop_assert!(d.delta <= floor);
                }
            }
        }

        for entry in rankings.over.iter().chain(&rankings.under) {
            let player = &roster[entry.player_index];
            prop_assert_eq!(&entry.name, &player.name);
            let d = outlier_delta(player, config.prediction).unwrap();
            prop_assert_eq!(entry.delta, d.delta);
        }
    }

    #[test]
    fn ranking_is_deterministic(roster in arb_roster()) {
        let config = RankingConfig::default();
        prop_assert_eq!(rank_outliers(&roster, &config), rank_outliers(&roster, &config));
    }
}

// ── 4. Search ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn search_hit_contains_query(roster in arb_roster(), query in "[a-zP0-9 ]{0,4}") {
        match SearchMode::default().find(&roster, &query) {
            Some(i) => {
                prop_assert!(query.chars().count() >= 2);
                prop_assert!(roster[i].name.to_lowercase().contains(&query.to_lowercase()));
                // first match in roster order
                for p in &roster[..i] {
                    prop_assert!(!p.name.to_lowercase().contains(&query.to_lowercase()));
                }
            }
            None => {
                let short = query.chars().count() < 2;
                let absent = roster
                    .iter()
                    .all(|p| !p.name.to_lowercase().contains(&query.to_lowercase()));
                prop_assert!(short || absent);
            }
        }
    }
}
