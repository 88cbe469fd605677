use super::*;

impl AppState {
    /// Fresh fetch cycle: the retry counter starts over.
    pub fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>, trigger: FetchTrigger) {
        log::info!("starting forecast fetch ({trigger:?})");
        self.retry.reset();
        self.issue_request(tx);
    }

    /// Cancels whatever request or retry timer is outstanding and issues a new request.
    pub(crate) fn issue_request(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if let Some(previous) = self.pending_request.take() {
            log::debug!("cancelling superseded request {}", previous.id);
            previous.cancel();
        }
        if let Some(timer) = self.retry_timer.take() {
            timer.cancel();
        }

        let location = self.location.sanitized();
        let id = self.next_id();
        let handle = spawn_fetch(tx.clone(), self.client.clone(), location, id);
        self.pending_request = Some(Tracked { id, handle });
        self.phase = FetchPhase::Fetching;
        self.status = ForecastStatus::Loading;
    }

    pub fn handle_retry_due(&mut self, tx: &mpsc::Sender<AppEvent>, timer_id: u64) {
        if self.retry_timer_id() != Some(timer_id) {
            log::debug!("ignoring stale retry timer {timer_id}");
            return;
        }
        self.retry_timer = None;
        log::info!(
            "retrying forecast fetch (attempt {}/{MAX_RETRY_ATTEMPTS})",
            self.retry.attempt_count()
        );
        self.issue_request(tx);
    }

    pub fn handle_fetch_completed(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        request_id: u64,
        outcome: Result<Vec<u8>, TransportError>,
    ) {
        if self.pending_request_id() != Some(request_id) {
            log::debug!("dropping response for superseded request {request_id}");
            return;
        }
        self.pending_request = None;

        match outcome {
            Ok(body) if is_blank(&body) => {
                self.handle_transport_failure(tx, &TransportError::EmptyBody);
            }
            Ok(body) => self.apply_response(&body),
            Err(err) => self.handle_transport_failure(tx, &err),
        }
    }

    pub(crate) fn apply_response(&mut self, body: &[u8]) {
        self.phase = FetchPhase::Idle;
        match parse_forecast(body) {
            Ok(data) => {
                self.retry.reset();
                if !data.timezone.is_empty() {
                    self.timezone.apply(data.timezone);
                    self.store.save(&self.location, &self.timezone);
                }
                log::info!("forecast updated with {} hourly samples", data.samples.len());
                self.samples = data.samples;
                self.refresh_clock(Utc::now());
                self.reselect_window();
                self.status = ForecastStatus::Ready;
                self.last_success = Some(Utc::now());
            }
            Err(err) => {
                log::warn!("forecast response rejected: {err}");
                self.status = ForecastStatus::ParseFailed(err);
            }
        }
    }

    pub(crate) fn handle_transport_failure(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        err: &TransportError,
    ) {
        log::warn!("forecast request failed: {err}");
        match self.retry.record_failure() {
            RetryDecision::Retry {
                delay_secs,
                attempt,
            } => {
                let id = self.next_id();
                let handle =
                    schedule_event(tx.clone(), delay_secs, AppEvent::RetryDue { timer_id: id });
                self.retry_timer = Some(Tracked { id, handle });
                self.phase = FetchPhase::RetryScheduled;
                let retry_at = Utc::now()
                    + chrono::Duration::seconds(i64::try_from(delay_secs).unwrap_or_default());
                self.status = ForecastStatus::Retrying {
                    retry_at,
                    delay_secs,
                    attempt,
                    max_attempts: MAX_RETRY_ATTEMPTS,
                };
                log::info!("retry {attempt}/{MAX_RETRY_ATTEMPTS} scheduled in {delay_secs}s");
            }
            RetryDecision::Exhausted => {
                log::warn!("retries exhausted, waiting for the next hourly update");
                self.phase = FetchPhase::Idle;
                self.status = ForecastStatus::RetriesExhausted;
            }
        }
    }

    /// Replaces any pending hourly timer with one due after `delay_secs`.
    pub fn schedule_hourly(&mut self, tx: &mpsc::Sender<AppEvent>, delay_secs: u64) {
        if let Some(previous) = self.hourly_timer.take() {
            previous.cancel();
        }
        let id = self.next_id();
        let handle =
            schedule_event(tx.clone(), delay_secs, AppEvent::TickHourly { timer_id: id });
        self.hourly_timer = Some(Tracked { id, handle });
        log::debug!("next scheduled update in {delay_secs}s");
    }

    pub fn handle_tick_hourly(&mut self, tx: &mpsc::Sender<AppEvent>, timer_id: u64) {
        if self.hourly_timer_id() != Some(timer_id) {
            return;
        }
        self.hourly_timer = None;
        self.schedule_hourly(tx, UPDATE_INTERVAL_SECONDS);
        self.start_fetch(tx, FetchTrigger::Hourly);
    }

    pub fn submit_location(&mut self, tx: &mpsc::Sender<AppEvent>, location: Location) {
        log::info!("location changed to {}", location.display_name());
        self.location = location;
        self.store.save(&self.location, &self.timezone);
        self.start_fetch(tx, FetchTrigger::User);
    }

    /// Seconds from `now_utc` to the next top of the hour on the display clock.
    pub fn seconds_until_next_update(&self, now_utc: DateTime<Utc>) -> u64 {
        seconds_until_next_hour(local_now(now_utc, &self.timezone).wall)
    }

    pub(crate) fn start_clock(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if let Some(previous) = self.clock_task.take() {
            previous.abort();
        }
        self.clock_task = Some(start_clock_task(tx.clone()));
    }

    pub fn handle_tick_clock(&mut self, now_utc: DateTime<Utc>) {
        let previous_hour = self.clock.as_ref().map(LocalClock::hour);
        self.refresh_clock(now_utc);
        let current_hour = self.clock.as_ref().map(LocalClock::hour);
        if self.window.is_some() && previous_hour != current_hour {
            self.reselect_window();
        }
    }

    fn refresh_clock(&mut self, now_utc: DateTime<Utc>) {
        self.clock = Some(local_now(now_utc, &self.timezone));
    }

    fn reselect_window(&mut self) {
        if let Some(clock) = &self.clock {
            self.window = Some(select_window(&self.samples, clock.hour()));
        }
    }
}

/// Empty or whitespace-only bodies carry no data and count as a transport failure.
pub(crate) fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}
