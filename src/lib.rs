pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod resilience;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use app::{
    config::ConfigStore,
    events::{AppEvent, spawn_input_task, spawn_signal_task},
    state::AppState,
};
use chrono::Utc;
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::forecast::{ForecastClient, parse_forecast};
use domain::{clock::local_now, window::select_window};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: &Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    spawn_signal_task(tx.clone());
    let mut app = AppState::new(cli);

    tx.send(AppEvent::Bootstrap).await?;

    drive(&mut app, &tx, &mut rx, input_stream, |app| {
        terminal.draw(|frame| ui::render(frame, app, Utc::now()))?;
        Ok(())
    })
    .await
}

/// Feeds input and loop events into `app` until it stops, redrawing after each one.
/// `shutdown` runs on every exit path.
pub(crate) async fn drive<S, D>(
    app: &mut AppState,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
    input_stream: S,
    mut draw: D,
) -> Result<()>
where
    S: futures::Stream<Item = crossterm::event::Event>,
    D: FnMut(&AppState) -> Result<()>,
{
    tokio::pin!(input_stream);
    let result = loop {
        if !app.running {
            break Ok(());
        }
        let step = tokio::select! {
            maybe_input = input_stream.next() => match maybe_input {
                Some(input) => app.handle_event(AppEvent::Input(input), tx).await,
                None => Ok(()),
            },
            maybe_event = rx.recv() => match maybe_event {
                Some(event) => app.handle_event(event, tx).await,
                None => Ok(()),
            },
        };
        if let Err(err) = step {
            break Err(err);
        }

        if app.running
            && let Err(err) = draw(app)
        {
            break Err(err);
        }
    };

    app.shutdown();
    result
}

/// Fetches once, prints the local time and the forecast window, and exits.
pub async fn run_one_shot(cli: &Cli) -> Result<()> {
    let store = ConfigStore::discover(cli.config_dir.as_deref());
    let mut stored = store.load(domain::weather::Location::default());
    if let Some(location) = cli.location_override() {
        stored.location = location;
        store.save(&stored.location, &stored.timezone);
    }
    let client = cli
        .forecast_url
        .as_deref()
        .map_or_else(ForecastClient::new, ForecastClient::with_base_url);

    let body = client
        .fetch_raw(&stored.location.sanitized())
        .await
        .context("fetching forecast")?;
    let data = parse_forecast(&body).context("parsing forecast")?;
    if !data.timezone.is_empty() {
        stored.timezone.apply(data.timezone);
        store.save(&stored.location, &stored.timezone);
    }

    let clock = local_now(Utc::now(), &stored.timezone);
    let window = select_window(&data.samples, clock.hour());

    let mut out = io::stdout().lock();
    writeln!(out, "{}  {}", clock.time, clock.date)?;
    writeln!(out, "{}", stored.location.display_name())?;
    for sample in window.samples() {
        writeln!(
            out,
            "{}  {:>3}  {:>7}  {}",
            sample.hour_label(),
            sample.icon(cli.icon_mode()),
            sample.temperature_label(),
            sample.description()
        )?;
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
