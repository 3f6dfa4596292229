// Panel presenter - Owns one panel's chart handle and status
use crate::application::chart_renderer::ChartRenderer;
use crate::domain::chart::{ChartData, ChartHandle};
use crate::domain::error::LoadError;
use crate::domain::panel::{ChartView, PanelDefinition, PanelKind, PanelSnapshot, PanelStatus};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// What to do with a load that finishes after a newer one was already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalePolicy {
    /// Drop it; the panel only moves forward in request order.
    Discard,
    /// Apply it; whichever load completes last wins.
    Apply,
}

/// Issued by `Panel::begin_load`, handed back to `Panel::present`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

struct LiveChart {
    handle: ChartHandle,
    data: ChartData,
}

struct PanelState {
    title: String,
    status: PanelStatus,
    message: String,
    is_error: bool,
    in_flight: usize,
    applied_generation: u64,
    chart: Option<LiveChart>,
    updated_at: Option<DateTime<Utc>>,
}

pub struct Panel {
    definition: PanelDefinition,
    renderer: Arc<dyn ChartRenderer>,
    stale_policy: StalePolicy,
    next_generation: AtomicU64,
    state: Mutex<PanelState>,
    updates: broadcast::Sender<PanelSnapshot>,
}

impl Panel {
    pub fn new(
        definition: PanelDefinition,
        renderer: Arc<dyn ChartRenderer>,
        stale_policy: StalePolicy,
        updates: broadcast::Sender<PanelSnapshot>,
    ) -> Self {
        let state = PanelState {
            title: definition.default_title.clone(),
            status: PanelStatus::Idle,
            message: String::new(),
            is_error: false,
            in_flight: 0,
            applied_generation: 0,
            chart: None,
            updated_at: None,
        };

        Self {
            definition,
            renderer,
            stale_policy,
            next_generation: AtomicU64::new(0),
            state: Mutex::new(state),
            updates,
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn kind(&self) -> PanelKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &PanelDefinition {
        &self.definition
    }

    /// Mark a load as started: show the loader, reset title and status.
    pub fn begin_load(&self) -> LoadTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = {
            let mut state = self.lock_state();
            state.in_flight += 1;
            state.title = self.definition.default_title.clone();
            state.status = PanelStatus::Loading;
            state.message.clear();
            state.is_error = false;
            self.snapshot_of(&state)
        };

        tracing::debug!(panel = %self.id(), generation, "Load started");
        self.publish(snapshot);

        LoadTicket { generation }
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Any previous chart handle is destroyed before a new one is created, so
    /// at most one handle is live for this panel at any time.
    pub fn present(&self, ticket: LoadTicket, outcome: Result<ChartData, LoadError>) {
        let snapshot = {
            let mut state = self.lock_state();
            state.in_flight = state.in_flight.saturating_sub(1);

            if self.stale_policy == StalePolicy::Discard
                && ticket.generation < state.applied_generation
            {
                tracing::debug!(
                    panel = %self.id(),
                    generation = ticket.generation,
                    applied = state.applied_generation,
                    "Discarding stale load result"
                );
                self.snapshot_of(&state)
            } else {
                state.applied_generation = state.applied_generation.max(ticket.generation);
                self.apply(&mut state, outcome);
                self.snapshot_of(&state)
            }
        };

        self.publish(snapshot);
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let state = self.lock_state();
        self.snapshot_of(&state)
    }

    fn apply(&self, state: &mut PanelState, outcome: Result<ChartData, LoadError>) {
        self.release_chart(state);
        state.updated_at = Some(Utc::now());

        match outcome {
            Ok(data) if !data.is_empty() => {
                let handle =
                    self.renderer
                        .create(&self.definition.surface, &self.definition.chart, &data);
                tracing::debug!(panel = %self.id(), handle = handle.id(), points = data.len(), "Chart created");

                state.title = self.definition.chart.title.clone();
                state.status = PanelStatus::Ready;
                state.message = loaded_message(data.len());
                state.is_error = false;
                state.chart = Some(LiveChart { handle, data });
            }
            Ok(_) => {
                state.status = PanelStatus::Empty;
                state.message = self.definition.empty_message.clone();
                state.is_error = true;
            }
            Err(e) => {
                tracing::warn!(panel = %self.id(), kind = e.kind(), "Load failed: {}", e);
                state.status = PanelStatus::Failed;
                state.message = format!("Error: {}", e);
                state.is_error = true;
            }
        }
    }

    fn release_chart(&self, state: &mut PanelState) {
        if let Some(previous) = state.chart.take() {
            tracing::debug!(panel = %self.id(), handle = previous.handle.id(), "Chart destroyed");
            self.renderer.destroy(previous.handle);
        }
    }

    fn snapshot_of(&self, state: &PanelState) -> PanelSnapshot {
        PanelSnapshot {
            id: self.definition.id.clone(),
            title: state.title.clone(),
            status: state.status,
            message: state.message.clone(),
            is_error: state.is_error,
            loading: state.in_flight > 0,
            chart: state.chart.as_ref().map(|live| ChartView {
                handle_id: live.handle.id(),
                spec: self.definition.chart.clone(),
                data: live.data.clone(),
            }),
            updated_at: state.updated_at,
        }
    }

    fn publish(&self, snapshot: PanelSnapshot) {
        // No subscribers is fine
        let _ = self.updates.send(snapshot);
    }

    fn lock_state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn loaded_message(entries: usize) -> String {
    let noun = if entries == 1 { "entry" } else { "entries" };
    format!("Loaded {} {}", entries, noun)
}
