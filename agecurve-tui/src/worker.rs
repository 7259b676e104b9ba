//! Background loader thread — both tables load here, off the UI thread.
//!
//! The two loads run side by side on rayon and post a `LoadEvent` each as
//! soon as they finish. The UI thread drains the channel between frames.

use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use agecurve_core::data::{load_curve_logged, load_players_logged, DataError, Loaded, Sources};
use agecurve_core::domain::{AgingCurve, PlayerRecord};

/// Completion of one of the two loads.
#[derive(Debug)]
pub enum LoadEvent {
    Curve(Result<Loaded<AgingCurve>, DataError>),
    Players(Result<Loaded<Vec<PlayerRecord>>, DataError>),
}

/// Spawn the loader thread.
pub fn spawn_loader(sources: Sources, tx: Sender<LoadEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("agecurve-loader".into())
        .spawn(move || load_sources(&sources, &tx))
}

/// Load both tables concurrently, sending each result as it completes.
///
/// Send failures mean the UI has gone away, so they are ignored.
pub fn load_sources(sources: &Sources, tx: &Sender<LoadEvent>) {
    let curve_tx = tx.clone();
    let players_tx = tx.clone();
    rayon::scope(|s| {
        s.spawn(move |_| {
            let _ = curve_tx.send(LoadEvent::Curve(load_curve_logged(&sources.curve)));
        });
        s.spawn(move |_| {
            let _ = players_tx.send(LoadEvent::Players(load_players_logged(&sources.players)));
        });
    });
}
