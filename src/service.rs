//! The snippet data service: owns the API client, fetches the library on
//! startup and then hourly, and runs create requests off the UI thread.
//! Results flow back to the app as events on an mpsc channel.
//!
//! Fetch failures are logged and swallowed; the app keeps serving the last
//! good snapshot. Create failures are surfaced to the app as an error event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::{ApiClient, NewSnippet, Snippet};
use crate::error::{Result, TroveError};
use crate::library::LibrarySnapshot;

#[derive(Debug)]
pub enum ServiceEvent {
    /// A fresh snapshot arrived. `announce` is set for the initial
    /// user-triggered load so the app can show a "loaded" notice; periodic
    /// refreshes stay quiet.
    LibraryLoaded {
        snapshot: LibrarySnapshot,
        announce: bool,
    },
    SnippetCreated(Result<Snippet>),
}

pub struct SnippetsService {
    client: Option<Arc<ApiClient>>,
    events: mpsc::Sender<ServiceEvent>,
    refresh_interval: Duration,
    // Bumped on every initialize(); a refresh thread exits once its
    // generation is superseded.
    generation: Arc<AtomicU64>,
}

impl SnippetsService {
    pub fn new(
        client: Option<ApiClient>,
        events: mpsc::Sender<ServiceEvent>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            client: client.map(Arc::new),
            events,
            refresh_interval,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }

    /// Fetch now and schedule hourly refreshes. Calling again replaces the
    /// previous schedule.
    pub fn initialize(&self) {
        let Some(client) = self.client.clone() else {
            log::warn!("no API credentials configured, snippet fetch disabled");
            return;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let events = self.events.clone();
        let interval = self.refresh_interval;

        thread::spawn(move || {
            let mut announce = true;
            loop {
                if current.load(Ordering::SeqCst) != generation {
                    break;
                }
                fetch_library(&client, &events, announce);
                announce = false;
                if !sleep_while_current(&current, generation, interval) {
                    break;
                }
            }
            log::debug!("refresh schedule {generation} superseded");
        });
    }

    /// Create a snippet on a worker thread. The outcome arrives as a
    /// `SnippetCreated` event; success also triggers a quiet refetch so the
    /// cached library picks up the new snippet.
    pub fn create_snippet(&self, attrs: NewSnippet) {
        let Some(client) = self.client.clone() else {
            let _ = self
                .events
                .send(ServiceEvent::SnippetCreated(Err(TroveError::MissingCredentials)));
            return;
        };
        let events = self.events.clone();

        thread::spawn(move || match client.create_snippet(attrs) {
            Ok(snippet) => {
                let _ = events.send(ServiceEvent::SnippetCreated(Ok(snippet)));
                fetch_library(&client, &events, false);
            }
            Err(err) => {
                log::error!("snippet create failed: {err}");
                let _ = events.send(ServiceEvent::SnippetCreated(Err(err)));
            }
        });
    }
}

/// Sleep out the refresh interval in short ticks, checking whether this
/// schedule is still current. Returns false once superseded, so a replaced
/// thread retires within a tick rather than after a full interval.
fn sleep_while_current(current: &AtomicU64, generation: u64, interval: Duration) -> bool {
    const TICK: Duration = Duration::from_millis(250);

    let deadline = Instant::now() + interval;
    loop {
        if current.load(Ordering::SeqCst) != generation {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(TICK));
    }
}

fn fetch_library(client: &ApiClient, events: &mpsc::Sender<ServiceEvent>, announce: bool) {
    match client.fetch_library() {
        Ok(response) => {
            let snapshot = LibrarySnapshot::from_response(response);
            log::debug!("library refreshed, {} snippets", snapshot.entries.len());
            let _ = events.send(ServiceEvent::LibraryLoaded { snapshot, announce });
        }
        Err(err) => {
            // The previous snapshot stays live; the next tick retries.
            log::warn!("library fetch failed: {err}");
        }
    }
}
