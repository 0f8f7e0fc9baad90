//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Spawned tasks send `UiEvent`s directly to `inbox_tx`; the runtime drains
//! `inbox_rx` each frame. The session store subscription runs as one such
//! task, which is how the identity gate receives its signals.

use std::future::Future;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use shelf_core::auth::{IdentityClient, SessionStore};
use shelf_core::catalog::CatalogClient;
use shelf_core::config::Config;
use shelf_core::export::write_books_csv;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while async work is in flight (60fps = ~16ms per frame).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing is
/// happening.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen dashboard runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop or panic.
pub struct DashboardRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    store: Arc<SessionStore>,
    identity: Arc<IdentityClient>,
    catalog: Arc<CatalogClient>,
    export_dir: PathBuf,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl DashboardRuntime {
    /// Creates a new runtime: sets up the terminal and the HTTP clients.
    pub fn new(config: &Config) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let store = Arc::new(SessionStore::new());
        let identity = Arc::new(IdentityClient::new(
            &config.identity.base_url,
            &config.identity.api_key,
        ));
        let catalog = Arc::new(CatalogClient::new(&config.catalog.base_url)?);

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            store,
            identity,
            catalog,
            export_dir: config.export_dir(),
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse_capture()?;
        self.start_session_watch();

        let result = self.event_loop();

        let _ = terminal::disable_mouse_capture();
        result
    }

    /// Subscribes to the session store and forwards every signal into the
    /// inbox. The startup restore runs after subscribing, so the first
    /// signal is never missed.
    fn start_session_watch(&self) {
        let mut rx = self.store.subscribe();
        let tx = self.inbox_tx.clone();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            store.restore();
            while rx.changed().await.is_ok() {
                let signal = rx.borrow_and_update().clone();
                if tx.send(UiEvent::Session(signal)).is_err() {
                    break;
                }
            }
        });
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick
                // cadence; input events batch renders to the next tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox, the terminal, and the tick timer.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while async work is in flight or the user is
        // interacting; slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_busy() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise, block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect whose result event lands in the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::SignIn { email, secret } => {
                let identity = Arc::clone(&self.identity);
                let store = Arc::clone(&self.store);
                self.spawn_effect(move || async move {
                    let result = identity.sign_in(&email, &secret).await;
                    let result = match result {
                        Ok(session) => {
                            // The store signal is what flips the gate; the
                            // finished event only settles the form.
                            if let Err(err) = store.establish(session.clone()) {
                                tracing::error!("failed to persist session: {err:#}");
                            }
                            Ok(session)
                        }
                        Err(err) => Err(err.to_string()),
                    };
                    UiEvent::SignInFinished(result)
                });
            }

            UiEffect::SignOut => {
                if let Err(err) = self.store.sign_out() {
                    tracing::error!("sign-out failed: {err:#}");
                }
            }

            UiEffect::Fetch {
                generation,
                query,
                limit,
                offset,
            } => {
                let catalog = Arc::clone(&self.catalog);
                self.spawn_effect(move || async move {
                    let result = catalog
                        .search(&query, limit, offset)
                        .await
                        .map_err(|err| err.to_string());
                    UiEvent::FetchFinished { generation, result }
                });
            }

            UiEffect::ExportCsv { books } => {
                let dir = self.export_dir.clone();
                self.spawn_effect(move || async move {
                    let result = tokio::task::spawn_blocking(move || {
                        write_books_csv(&dir, &books)
                    })
                    .await
                    .map_err(|err| err.to_string())
                    .and_then(|result| result.map_err(|err| err.to_string()));
                    UiEvent::ExportFinished(result)
                });
            }

            UiEffect::PersistPageSize { size } => {
                // Errors are silently ignored - the size is already set in state
                let _ = Config::save_page_size(size);
            }
        }
    }
}

impl Drop for DashboardRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
