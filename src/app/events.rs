use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{MissedTickBehavior, interval, sleep},
};

use crate::{
    data::forecast::{ForecastClient, TransportError},
    domain::weather::Location,
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickClock,
    TickHourly {
        timer_id: u64,
    },
    RetryDue {
        timer_id: u64,
    },
    Input(Event),
    FetchCompleted {
        request_id: u64,
        outcome: Result<Vec<u8>, TransportError>,
    },
    LocationSubmitted(Location),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_clock_task(tx: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickClock).await.is_err() {
                break;
            }
        }
    })
}

/// One-shot timer delivering `event` after `delay_secs`.
pub fn schedule_event(
    tx: mpsc::Sender<AppEvent>,
    delay_secs: u64,
    event: AppEvent,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(Duration::from_secs(delay_secs)).await;
        let _ = tx.send(event).await;
    })
}

pub fn spawn_fetch(
    tx: mpsc::Sender<AppEvent>,
    client: ForecastClient,
    location: Location,
    request_id: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = client.fetch_raw(&location).await;
        let _ = tx
            .send(AppEvent::FetchCompleted {
                request_id,
                outcome,
            })
            .await;
    })
}

pub fn spawn_signal_task(tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(AppEvent::Quit).await;
        }
    });
}
