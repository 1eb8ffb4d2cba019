//! Graph screen: sensor readings filtered by a time window, drawn as a
//! dual-axis line or bar chart.
//!
//! State lives in [`GraphState`] and changes only through [`reduce`].
//! [`GraphScreen`] owns the state, re-runs the fetch whenever the
//! `(token, time_range)` pair changes, and feeds fetch results back in as
//! events. Each fetch carries a generation; results from anything but the
//! pending generation are dropped, so a slow response for an old range can
//! never overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::chart::{self, ChartConfig, ChartVariant};
use crate::effects::EffectScheduler;
use crate::error::FetchError;
use crate::filter::{filter_by_range, TimeRange};
use crate::models::{SensorReading, SessionToken};
use crate::sensors::ReadingsSource;

// ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    // ---
    pub token: SessionToken,
    pub time_range: TimeRange,
    pub chart_variant: ChartVariant,
    /// Last successfully fetched set, unfiltered, in server order.
    pub readings: Vec<SensorReading>,
    pub status: LoadStatus,
    /// Generation of the fetch whose result is still awaited.
    pub pending: Option<u64>,
}

impl GraphState {
    // ---
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// Readings inside the selected window as of `now`.
    pub fn visible_readings(&self, now: DateTime<Utc>) -> Vec<SensorReading> {
        filter_by_range(&self.readings, &self.time_range, now)
    }
}

#[derive(Debug)]
pub enum GraphEvent {
    TokenChanged(SessionToken),
    TimeRangeSelected(TimeRange),
    ChartVariantSelected(ChartVariant),
    FetchStarted {
        generation: u64,
    },
    FetchSucceeded {
        generation: u64,
        readings: Vec<SensorReading>,
    },
    FetchFailed {
        generation: u64,
        error: FetchError,
    },
}

/// Pure state transition for the graph screen.
pub fn reduce(mut state: GraphState, event: GraphEvent) -> GraphState {
    // ---
    match event {
        GraphEvent::TokenChanged(token) => {
            if token != state.token {
                state.token = token;
                state.status = LoadStatus::Idle;
            }
        }
        GraphEvent::TimeRangeSelected(range) => state.time_range = range,
        GraphEvent::ChartVariantSelected(variant) => state.chart_variant = variant,
        GraphEvent::FetchStarted { generation } => {
            state.pending = Some(generation);
            if state.status == LoadStatus::Idle {
                state.status = LoadStatus::Loading;
            }
        }
        GraphEvent::FetchSucceeded {
            generation,
            readings,
        } => {
            if state.pending == Some(generation) {
                state.readings = readings;
                state.status = LoadStatus::Loaded;
                state.pending = None;
            }
        }
        GraphEvent::FetchFailed { generation, .. } => {
            if state.pending == Some(generation) {
                state.status = LoadStatus::LoadFailed;
                state.pending = None;
            }
        }
    }
    state
}

pub struct GraphScreen<S> {
    // ---
    source: Arc<S>,
    state: GraphState,
    scheduler: EffectScheduler<(SessionToken, TimeRange)>,
    events_tx: mpsc::UnboundedSender<GraphEvent>,
    events_rx: mpsc::UnboundedReceiver<GraphEvent>,
}

impl<S: ReadingsSource> GraphScreen<S> {
    // ---
    /// Open the screen for `token` and start the first fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: Arc<S>, token: SessionToken) -> Self {
        Self::with_selection(source, token, TimeRange::default(), ChartVariant::default())
    }

    pub fn with_selection(
        source: Arc<S>,
        token: SessionToken,
        time_range: TimeRange,
        chart_variant: ChartVariant,
    ) -> Self {
        // ---
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut screen = Self {
            source,
            state: GraphState {
                time_range,
                chart_variant,
                ..GraphState::new(token)
            },
            scheduler: EffectScheduler::new(),
            events_tx,
            events_rx,
        };
        screen.sync_effects();
        screen
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    /// Apply an event, then start a fetch if the dependencies moved.
    ///
    /// `FetchStarted` is only ever issued by the screen for a fetch it has
    /// spawned; one dispatched from outside is dropped, since no task would
    /// complete it and [`settle`](Self::settle) would wait forever.
    pub fn dispatch(&mut self, event: GraphEvent) {
        // ---
        if let GraphEvent::FetchStarted { generation } = event {
            warn!("Ignoring externally dispatched FetchStarted (generation {})", generation);
            return;
        }
        self.apply(event);
        self.sync_effects();
    }

    pub fn set_token(&mut self, token: SessionToken) {
        self.dispatch(GraphEvent::TokenChanged(token));
    }

    pub fn select_time_range(&mut self, range: TimeRange) {
        self.dispatch(GraphEvent::TimeRangeSelected(range));
    }

    pub fn select_chart_variant(&mut self, variant: ChartVariant) {
        self.dispatch(GraphEvent::ChartVariantSelected(variant));
    }

    /// Wait until the pending fetch, if any, has landed.
    pub async fn settle(&mut self) -> &GraphState {
        // ---
        while self.state.pending.is_some() {
            // The screen holds a sender, so the channel never closes here.
            let Some(event) = self.events_rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
        &self.state
    }

    /// Filter, project and render the current state as of `now`.
    pub fn view<Tz>(&self, now: DateTime<Utc>, tz: &Tz) -> ChartConfig
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        // ---
        let visible = self.state.visible_readings(now);
        debug!(
            "Rendering {} of {} readings for {} as {}",
            visible.len(),
            self.state.readings.len(),
            self.state.time_range,
            self.state.chart_variant
        );
        chart::render(self.state.chart_variant, chart::project(&visible, tz))
    }

    fn apply(&mut self, event: GraphEvent) {
        // ---
        match &event {
            GraphEvent::FetchSucceeded {
                generation,
                readings,
            } => info!(
                "Fetch generation {} returned {} readings",
                generation,
                readings.len()
            ),
            GraphEvent::FetchFailed { generation, error } => {
                error!("Failed to fetch sensor readings (generation {}): {}", generation, error)
            }
            _ => {}
        }
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    fn sync_effects(&mut self) {
        // ---
        let deps = (self.state.token.clone(), self.state.time_range.clone());
        let token = self.state.token.clone();
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();

        let started = self.scheduler.run_if_changed(deps, move |generation| async move {
            let event = match source.load_readings(&token).await {
                Ok(readings) => GraphEvent::FetchSucceeded {
                    generation,
                    readings,
                },
                Err(error) => GraphEvent::FetchFailed { generation, error },
            };
            // Receiver gone means the screen was closed.
            let _ = events.send(event);
        });

        if let Some(generation) = started {
            debug!("Fetch generation {} started for range {}", generation, self.state.time_range);
            self.apply(GraphEvent::FetchStarted { generation });
        }
    }
}
