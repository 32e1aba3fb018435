//! Toolchain registry
//!
//! Caches the result of the last toolchain scan. Readers take a snapshot with
//! a single atomic load; a refresh publishes a whole new snapshot or nothing.
//!
//! ```text
//! Empty --refresh--> Loading --ok--> Ready
//!                        |---err---> Stale   (versions kept)
//!                        `--cancel-> previous state
//! ```

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::entities::{CacheState, CatalogSnapshot};
use crate::domain::ports::{CancelToken, ScanError, ToolchainCatalog, ToolchainScanner};
use crate::domain::value_objects::ToolchainVersion;

/// Outcome of one refresh, delivered exactly once per refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RefreshEvent {
    /// A new catalog was published
    Completed { count: usize },
    /// The scan failed; the previous versions are kept and marked stale
    Failed { message: String },
    /// The refresh was cancelled or its registry dropped; nothing was published
    Cancelled,
    /// A newer refresh started before this one finished; its result was dropped
    Superseded,
}

impl RefreshEvent {
    pub fn is_completed(&self) -> bool {
        matches!(self, RefreshEvent::Completed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct RefreshTicket {
    generation: u64,
    previous_state: CacheState,
}

pub struct ToolchainRegistry {
    scanner: Arc<dyn ToolchainScanner>,
    catalog: ArcSwap<CatalogSnapshot>,
    /// Latest refresh generation. Held while changing state so a refresh that
    /// finished late cannot overwrite a newer one.
    generation: Mutex<u64>,
    subscribers: Mutex<Vec<Sender<Arc<CatalogSnapshot>>>>,
}

impl ToolchainRegistry {
    pub fn new(scanner: Arc<dyn ToolchainScanner>) -> Self {
        Self {
            scanner,
            catalog: ArcSwap::from_pointee(CatalogSnapshot::empty()),
            generation: Mutex::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> CacheState {
        self.catalog.load().state()
    }

    /// Receive every snapshot published after this call.
    pub fn subscribe(&self) -> Receiver<Arc<CatalogSnapshot>> {
        let (tx, rx) = mpsc::channel();
        lock(&self.subscribers).push(tx);
        rx
    }

    /// Scan on the calling thread.
    pub fn refresh(&self) -> RefreshEvent {
        let ticket = self.begin();
        let result = self.scanner.scan(&CancelToken::new());
        self.finish(ticket, result)
    }

    /// Scan on a worker thread. The worker only holds a weak reference, so
    /// dropping the registry abandons the result.
    pub fn spawn_refresh(self: &Arc<Self>) -> RefreshHandle {
        let ticket = self.begin();
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::channel();

        let registry: Weak<Self> = Arc::downgrade(self);
        let scanner = Arc::clone(&self.scanner);
        let worker_cancel = cancel.clone();
        let worker_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("rubicon-toolchain-scan".to_string())
            .spawn(move || {
                let result = scanner.scan(&worker_cancel);
                let event = match registry.upgrade() {
                    Some(registry) if worker_cancel.is_cancelled() => {
                        registry.finish(ticket, Err(ScanError::Cancelled))
                    }
                    Some(registry) => registry.finish(ticket, result),
                    None => {
                        debug!("registry dropped during scan, discarding result");
                        RefreshEvent::Cancelled
                    }
                };
                let _ = worker_tx.send(event);
            });

        let worker = match spawned {
            Ok(worker) => Some(worker),
            Err(source) => {
                let event = self.finish(
                    ticket,
                    Err(ScanError::Io {
                        root: PathBuf::new(),
                        source,
                    }),
                );
                let _ = tx.send(event);
                None
            }
        };

        RefreshHandle {
            events: rx,
            cancel,
            worker,
            delivered: false,
        }
    }

    fn begin(&self) -> RefreshTicket {
        let mut generation = lock(&self.generation);
        *generation += 1;

        let current = self.catalog.load_full();
        let previous_state = match current.state() {
            // An unfinished refresh was superseded; fall back to what the
            // versions themselves say.
            CacheState::Loading if current.refreshed_at().is_some() => CacheState::Ready,
            CacheState::Loading => CacheState::Empty,
            state => state,
        };
        self.catalog
            .store(Arc::new(current.with_state(CacheState::Loading)));

        debug!(generation = *generation, "toolchain refresh started");
        RefreshTicket {
            generation: *generation,
            previous_state,
        }
    }

    fn finish(
        &self,
        ticket: RefreshTicket,
        result: Result<Vec<ToolchainVersion>, ScanError>,
    ) -> RefreshEvent {
        let generation = lock(&self.generation);
        if *generation != ticket.generation {
            debug!(
                generation = ticket.generation,
                latest = *generation,
                "toolchain refresh superseded"
            );
            return RefreshEvent::Superseded;
        }

        let current = self.catalog.load_full();
        let (next, event) = match result {
            Ok(versions) => {
                let next = CatalogSnapshot::from_scan(versions);
                let count = next.len();
                info!(count, "toolchain catalog refreshed");
                (next, RefreshEvent::Completed { count })
            }
            Err(ScanError::Cancelled) => {
                debug!("toolchain refresh cancelled");
                self.catalog
                    .store(Arc::new(current.with_state(ticket.previous_state)));
                return RefreshEvent::Cancelled;
            }
            Err(err) => {
                warn!(error = %err, "toolchain refresh failed, keeping previous catalog");
                (
                    current.with_state(CacheState::Stale),
                    RefreshEvent::Failed {
                        message: err.to_string(),
                    },
                )
            }
        };

        let next = Arc::new(next);
        self.catalog.store(Arc::clone(&next));
        drop(generation);

        self.notify(&next);
        event
    }

    fn notify(&self, snapshot: &Arc<CatalogSnapshot>) {
        lock(&self.subscribers).retain(|tx| tx.send(Arc::clone(snapshot)).is_ok());
    }
}

impl ToolchainCatalog for ToolchainRegistry {
    fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.catalog.load_full()
    }
}

impl std::fmt::Debug for ToolchainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.catalog.load();
        f.debug_struct("ToolchainRegistry")
            .field("state", &snapshot.state())
            .field("versions", &snapshot.len())
            .finish_non_exhaustive()
    }
}

/// Control side of a background refresh.
#[derive(Debug)]
pub struct RefreshHandle {
    events: Receiver<RefreshEvent>,
    cancel: CancelToken,
    worker: Option<thread::JoinHandle<()>>,
    delivered: bool,
}

impl RefreshHandle {
    /// Ask the worker to stop. Its result, if any, is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Non-blocking poll. Yields the event once, then `None` forever.
    pub fn try_event(&mut self) -> Option<RefreshEvent> {
        if self.delivered {
            return None;
        }
        let event = match self.events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => worker_lost(),
        };
        self.delivered = true;
        Some(event)
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> RefreshEvent {
        let event = self.events.recv().unwrap_or_else(|_| worker_lost());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        event
    }
}

fn worker_lost() -> RefreshEvent {
    RefreshEvent::Failed {
        message: "toolchain scan worker stopped without reporting".to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
