//! Background searches with last-one-wins delivery.
//!
//! Every submission gets a sequence number and runs on its own thread. The
//! foreground drains completions from a channel and only applies the one that
//! matches the latest sequence issued; anything older is dropped. The result
//! set moves across the channel whole, so the foreground never sees it half
//! built.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::handlers::{run_search, SearchOutcome, StoreTransport};
use crate::models::SearchResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    NotSearchedYet,
    Loading,
    NoResults,
    NetworkError,
    Results(Arc<[SearchResult]>),
}

impl From<SearchOutcome> for SearchState {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Empty => SearchState::NoResults,
            SearchOutcome::Error => SearchState::NetworkError,
            SearchOutcome::Items(items) => SearchState::Results(items.into()),
        }
    }
}

/// Detail screen trigger supplied by the UI.
pub trait DetailPresenter {
    fn show_detail(&mut self, result: &SearchResult);
}

impl<F> DetailPresenter for F
where
    F: FnMut(&SearchResult),
{
    fn show_detail(&mut self, result: &SearchResult) {
        (self)(result)
    }
}

struct Completion {
    sequence: u64,
    outcome: SearchOutcome,
}

pub struct SearchSession {
    transport: Arc<dyn StoreTransport>,
    config: Arc<SearchConfig>,
    state: SearchState,
    latest_sequence: u64,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl SearchSession {
    pub fn new(transport: Arc<dyn StoreTransport>, config: SearchConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        SearchSession {
            transport,
            config: Arc::new(config),
            state: SearchState::NotSearchedYet,
            latest_sequence: 0,
            sender,
            receiver,
        }
    }

    /// Starts a search in the background and returns its sequence number.
    pub fn submit(&mut self, term: &str) -> Result<u64> {
        if term.trim().is_empty() {
            return Err(AppError::InvalidTerm);
        }

        let transport = Arc::clone(&self.transport);
        let config = Arc::clone(&self.config);
        let sender = self.sender.clone();
        let worker_term = term.to_string();

        let sequence = self.begin(|sequence| {
            thread::Builder::new()
                .name(format!("search-{sequence}"))
                .spawn(move || {
                    let outcome = run_search(transport.as_ref(), &config, &worker_term);
                    // The session may be gone already; nobody is left to tell.
                    let _ = sender.send(Completion { sequence, outcome });
                })
                .map(|_| ())
        })?;

        debug!("Submitted search #{} for {:?}", sequence, term);
        Ok(sequence)
    }

    /// Issues the next sequence number once `spawn` has started its worker.
    /// A failed spawn leaves sequence and state untouched.
    fn begin<S>(&mut self, spawn: S) -> Result<u64>
    where
        S: FnOnce(u64) -> std::io::Result<()>,
    {
        let sequence = self.latest_sequence + 1;
        spawn(sequence)
            .map_err(|e| AppError::Other(format!("failed to spawn search thread: {e}")))?;

        self.latest_sequence = sequence;
        self.state = SearchState::Loading;
        Ok(sequence)
    }

    /// Applies whatever completions have arrived. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.receiver.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Blocks until the latest search settles or `timeout` passes.
    /// Returns true once the state is no longer `Loading`.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state == SearchState::Loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false;
                }
            }
        }
        true
    }

    /// Like [`wait`](Self::wait), but gives up as soon as `keep_waiting` turns false.
    /// Checks in short slices so an interrupt is noticed promptly.
    pub fn wait_while<F>(&mut self, timeout: Duration, keep_waiting: F) -> bool
    where
        F: Fn() -> bool,
    {
        const SLICE: Duration = Duration::from_millis(100);
        let deadline = Instant::now() + timeout;
        while self.state == SearchState::Loading {
            if !keep_waiting() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            self.wait(remaining.min(SLICE));
        }
        true
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.sequence != self.latest_sequence {
            debug!(
                "Discarding stale search #{} (latest is #{})",
                completion.sequence, self.latest_sequence
            );
            return false;
        }
        self.state = completion.outcome.into();
        true
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    pub fn is_loading(&self) -> bool {
        self.state == SearchState::Loading
    }

    pub fn results(&self) -> Option<Arc<[SearchResult]>> {
        match &self.state {
            SearchState::Results(results) => Some(Arc::clone(results)),
            _ => None,
        }
    }

    pub fn result_at(&self, index: usize) -> Option<&SearchResult> {
        match &self.state {
            SearchState::Results(results) => results.get(index),
            _ => None,
        }
    }

    /// Hands the selected result to the detail screen. Nothing is selectable
    /// while loading or without results.
    pub fn open_detail(&self, index: usize, presenter: &mut dyn DetailPresenter) -> bool {
        match self.result_at(index) {
            Some(result) => {
                presenter.show_detail(result);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use url::Url;

    /// Returns a body per term and can hold a term back until released.
    struct ScriptedStore {
        gate: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl StoreTransport for ScriptedStore {
        fn get_text(&self, url: &Url) -> Result<String> {
            let term = url
                .query_pairs()
                .find(|(k, _)| k == "term")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            if term == "slow" {
                if let Some(gate) = self.gate.lock().unwrap().take() {
                    let _ = gate.recv();
                }
            }
            if term == "none" {
                return Ok(r#"{"results":[]}"#.to_string());
            }
            if term == "broken" {
                return Err(AppError::Other("offline".into()));
            }
            Ok(format!(
                r#"{{"results":[{{"wrapperType":"track","trackName":"{term}","artistName":"A","artworkUrl60":"s","artworkUrl100":"l","trackViewUrl":"v","kind":"song","currency":"USD"}}]}}"#
            ))
        }

        fn get_bytes(&self, _url: &Url) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn session() -> (SearchSession, mpsc::Sender<()>) {
        let (release, gate) = mpsc::channel();
        let store = ScriptedStore {
            gate: Mutex::new(Some(gate)),
        };
        (
            SearchSession::new(Arc::new(store), SearchConfig::default()),
            release,
        )
    }

    #[test]
    fn starts_not_searched() {
        let (session, _release) = session();
        assert_eq!(session.state(), &SearchState::NotSearchedYet);
        assert_eq!(session.latest_sequence(), 0);
    }

    #[test]
    fn rejects_empty_term_without_issuing_sequence() {
        let (mut session, _release) = session();
        assert!(matches!(session.submit(" "), Err(AppError::InvalidTerm)));
        assert_eq!(session.latest_sequence(), 0);
        assert_eq!(session.state(), &SearchState::NotSearchedYet);
    }

    #[test]
    fn delivers_results() {
        let (mut session, _release) = session();
        assert_eq!(session.submit("hello").unwrap(), 1);
        assert!(session.is_loading());
        assert!(session.wait(Duration::from_secs(5)));
        assert_eq!(session.result_at(0).map(|r| r.name.as_str()), Some("hello"));
    }

    #[test]
    fn maps_outcomes_to_states() {
        let (mut session, _release) = session();
        session.submit("none").unwrap();
        assert!(session.wait(Duration::from_secs(5)));
        assert_eq!(session.state(), &SearchState::NoResults);

        session.submit("broken").unwrap();
        assert!(session.wait(Duration::from_secs(5)));
        assert_eq!(session.state(), &SearchState::NetworkError);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let (mut session, release) = session();
        let first = session.submit("slow").unwrap();
        let second = session.submit("fast").unwrap();
        assert!(second > first);

        assert!(session.wait(Duration::from_secs(5)));
        assert_eq!(session.result_at(0).map(|r| r.name.as_str()), Some("fast"));

        release.send(()).unwrap();
        let stale = session
            .receiver
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(stale.sequence, first);
        assert!(!session.apply(stale));
        assert_eq!(session.result_at(0).map(|r| r.name.as_str()), Some("fast"));
    }

    #[test]
    fn failed_spawn_leaves_session_untouched() {
        let (mut session, _release) = session();
        session.submit("none").unwrap();
        assert!(session.wait(Duration::from_secs(5)));

        let err = session
            .begin(|_| Err(std::io::Error::new(std::io::ErrorKind::Other, "no threads")))
            .unwrap_err();
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(session.latest_sequence(), 1);
        assert_eq!(session.state(), &SearchState::NoResults);
        assert!(session.wait(Duration::from_millis(10)));
    }

    #[test]
    fn wait_while_stops_when_interrupted() {
        let (mut session, release) = session();
        session.submit("slow").unwrap();

        let started = Instant::now();
        assert!(!session.wait_while(Duration::from_secs(30), || false));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(session.is_loading());

        release.send(()).unwrap();
        assert!(session.wait_while(Duration::from_secs(5), || true));
        assert_eq!(session.result_at(0).map(|r| r.name.as_str()), Some("slow"));
    }

    #[test]
    fn detail_only_for_present_results() {
        let (mut session, _release) = session();
        let mut shown = Vec::new();

        session.submit("pick").unwrap();
        assert!(!session.open_detail(0, &mut |r: &SearchResult| shown.push(r.name.clone())));

        assert!(session.wait(Duration::from_secs(5)));
        assert!(session.open_detail(0, &mut |r: &SearchResult| shown.push(r.name.clone())));
        assert!(!session.open_detail(1, &mut |r: &SearchResult| shown.push(r.name.clone())));
        assert_eq!(shown, vec!["pick".to_string()]);
    }
}
