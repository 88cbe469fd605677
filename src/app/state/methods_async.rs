use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Quit,
    Refresh,
    EditLocation,
}

impl AppState {
    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx),
            AppEvent::TickClock => self.handle_tick_clock(Utc::now()),
            AppEvent::TickHourly { timer_id } => self.handle_tick_hourly(tx, timer_id),
            AppEvent::RetryDue { timer_id } => self.handle_retry_due(tx, timer_id),
            AppEvent::FetchCompleted {
                request_id,
                outcome,
            } => self.handle_fetch_completed(tx, request_id, outcome),
            AppEvent::LocationSubmitted(location) => self.submit_location(tx, location),
            AppEvent::Input(input) => self.handle_input(input, tx).await?,
            AppEvent::Quit => self.running = false,
        }
        Ok(())
    }

    pub(crate) fn handle_bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let now = Utc::now();
        self.start_clock(tx);
        self.handle_tick_clock(now);
        let delay = self.seconds_until_next_update(now);
        self.schedule_hourly(tx, delay);
        self.start_fetch(tx, FetchTrigger::Startup);
    }

    pub(crate) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        if self.location_input.is_some() {
            return self.handle_location_input_key(key, tx).await;
        }
        self.handle_main_key(key, tx).await
    }

    async fn handle_main_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        let command = if key.code == KeyCode::Esc {
            Some(KeyCommand::Quit)
        } else {
            input::command_char(key).and_then(command_from_char)
        };
        match command {
            Some(KeyCommand::Quit) => tx.send(AppEvent::Quit).await?,
            Some(KeyCommand::Refresh) => self.start_fetch(tx, FetchTrigger::User),
            Some(KeyCommand::EditLocation) => {
                self.location_input = Some(LocationInput::default());
            }
            None => {}
        }
        Ok(())
    }

    async fn handle_location_input_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        let Some(prompt) = self.location_input.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => self.location_input = None,
            KeyCode::Enter => match parse_location_input(&prompt.buffer) {
                Ok(location) => {
                    self.location_input = None;
                    tx.send(AppEvent::LocationSubmitted(location)).await?;
                }
                Err(message) => prompt.error = Some(message),
            },
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Char(ch) => prompt.push(ch),
            _ => {}
        }
        Ok(())
    }
}

fn command_from_char(ch: char) -> Option<KeyCommand> {
    match ch {
        'q' => Some(KeyCommand::Quit),
        'r' => Some(KeyCommand::Refresh),
        'l' => Some(KeyCommand::EditLocation),
        _ => None,
    }
}
