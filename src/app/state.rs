use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    app::{
        config::ConfigStore,
        events::{AppEvent, schedule_event, spawn_fetch, start_clock_task},
    },
    cli::{Cli, IconMode},
    data::forecast::{ForecastClient, TransportError, parse_forecast},
    domain::{
        clock::{LocalClock, local_now},
        weather::{
            ForecastStatus, ForecastWindow, HourlySample, Location, MAX_COORDINATE_LEN,
            TimezoneState,
        },
        window::select_window,
    },
    resilience::{
        backoff::{MAX_RETRY_ATTEMPTS, RetryDecision, RetryState},
        freshness::{FreshnessState, evaluate_freshness},
        schedule::{UPDATE_INTERVAL_SECONDS, seconds_until_next_hour},
    },
};

mod input;
mod methods_async;
mod methods_fetch;

pub use input::{LocationInput, parse_location_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    RetryScheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Startup,
    Hourly,
    User,
}

/// Handle to a spawned task tagged with the id its completion event will carry.
#[derive(Debug)]
struct Tracked {
    id: u64,
    handle: JoinHandle<()>,
}

impl Tracked {
    fn cancel(self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub phase: FetchPhase,
    pub location: Location,
    pub timezone: TimezoneState,
    pub retry: RetryState,
    pub status: ForecastStatus,
    pub samples: Vec<HourlySample>,
    pub window: Option<ForecastWindow>,
    pub clock: Option<LocalClock>,
    pub last_success: Option<DateTime<Utc>>,
    pub location_input: Option<LocationInput>,
    pub icon_mode: IconMode,
    store: ConfigStore,
    client: ForecastClient,
    pending_request: Option<Tracked>,
    retry_timer: Option<Tracked>,
    hourly_timer: Option<Tracked>,
    clock_task: Option<JoinHandle<()>>,
    next_id: u64,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let store = ConfigStore::discover(cli.config_dir.as_deref());
        let client = cli
            .forecast_url
            .as_deref()
            .map_or_else(ForecastClient::new, ForecastClient::with_base_url);
        Self::with_parts(cli, store, client)
    }

    pub fn with_parts(cli: &Cli, store: ConfigStore, client: ForecastClient) -> Self {
        let stored = store.load(Location::default());
        let mut location = stored.location;
        if let Some(over) = cli.location_override() {
            location = over;
            store.save(&location, &stored.timezone);
        }
        log::info!("forecast location {}", location.display_name());

        Self {
            running: true,
            phase: FetchPhase::Idle,
            location,
            timezone: stored.timezone,
            retry: RetryState::new(),
            status: ForecastStatus::Loading,
            samples: Vec::new(),
            window: None,
            clock: None,
            last_success: None,
            location_input: None,
            icon_mode: cli.icon_mode(),
            store,
            client,
            pending_request: None,
            retry_timer: None,
            hourly_timer: None,
            clock_task: None,
            next_id: 0,
        }
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn pending_request_id(&self) -> Option<u64> {
        self.pending_request.as_ref().map(|t| t.id)
    }

    pub fn retry_timer_id(&self) -> Option<u64> {
        self.retry_timer.as_ref().map(|t| t.id)
    }

    pub fn hourly_timer_id(&self) -> Option<u64> {
        self.hourly_timer.as_ref().map(|t| t.id)
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn freshness(&self, now: DateTime<Utc>) -> FreshnessState {
        evaluate_freshness(self.last_success, now, self.status.is_failure())
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Cancels the in-flight request and every timer.
    pub fn shutdown(&mut self) {
        log::info!("shutting down, cancelling pending work");
        if let Some(request) = self.pending_request.take() {
            request.cancel();
        }
        if let Some(timer) = self.retry_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.hourly_timer.take() {
            timer.cancel();
        }
        if let Some(task) = self.clock_task.take() {
            task.abort();
        }
        self.running = false;
    }
}
