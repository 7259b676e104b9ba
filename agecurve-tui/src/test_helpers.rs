//! Test helpers for creating sample sessions

use std::sync::mpsc;

use agecurve_core::domain::{AgingCurve, AgingCurvePoint, Backtest, PlayerRecord, SeasonPoint};
use agecurve_core::{AppConfig, Session};

use crate::app::AppState;

fn season(age: u32, performance_index: f64) -> SeasonPoint {
    SeasonPoint { age, performance_index }
}

pub fn sample_curve() -> AgingCurve {
    AgingCurve::from_points(
        (20..=40)
            .map(|age| AgingCurvePoint {
                age,
                age_factor: 1.0 - ((age as f64 - 27.0) / 20.0).powi(2),
            })
            .collect(),
    )
}

/// Two over-performers (Betts +20, Trout +15), two under (Judge -10, Freeman -7).
pub fn sample_players() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord {
            name: "Mike Trout".into(),
            history: vec![season(30, 176.0), season(31, 120.0)],
            forecast: vec![season(32, 140.0)],
            backtest: Some(Backtest {
                age: 31,
                expected_index: 105.0,
                actual_index: 120.0,
            }),
        },
        PlayerRecord {
            name: "Aaron Judge".into(),
            history: vec![season(30, 207.0), season(31, 150.0)],
            forecast: vec![season(32, 160.0)],
            backtest: None,
        },
        PlayerRecord {
            name: "Mookie Betts".into(),
            history: vec![season(30, 136.0), season(31, 165.0)],
            forecast: vec![season(32, 145.0)],
            backtest: None,
        },
        PlayerRecord {
            name: "Freddie Freeman".into(),
            history: vec![season(33, 150.0), season(34, 133.0)],
            forecast: vec![season(35, 128.0)],
            backtest: Some(Backtest {
                age: 34,
                expected_index: 140.0,
                actual_index: 133.0,
            }),
        },
    ]
}

/// An app whose loads have both completed.
pub fn ready_app() -> AppState {
    let session = Session::with_data(&AppConfig::default(), sample_curve(), sample_players());
    let (_tx, rx) = mpsc::channel();
    AppState::new(session, rx)
}
