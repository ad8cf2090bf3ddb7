//! Forecast backend: async fetch of the latest row and rendering of a frame.
//! Network work runs on spawned tasks; results are sent back via mpsc.
//!
//! Loads are single-flight: a trigger that arrives while a fetch is in
//! progress is skipped, so frames always arrive in trigger order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use getij_core::{Config, ViewMode};
use getij_forecast::{model_from_row, ForecastClient, ForecastError, LatestRow};
use tokio::sync::mpsc;

use crate::error_mapping;
use crate::render::{self, Status};

/// What to render on each refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub view: ViewMode,
    pub expand_all: bool,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            view: config.display.view,
            expand_all: config.display.expand_all,
        }
    }
}

/// One complete refresh result: a status line and the rendered body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub status: Status,
    pub body: String,
}

impl Frame {
    pub fn is_error(&self) -> bool {
        self.status.is_error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Frame),
    /// Another load was already in flight
    Skipped,
}

/// Messages sent from load tasks back to the main loop
#[derive(Debug)]
pub enum ForecastServiceMessage {
    /// A load has started
    Loading,
    /// A load has finished
    Done(Frame),
}

/// Clears the in-flight flag when the load finishes, however it ends.
pub(crate) struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct ForecastService {
    client: ForecastClient,
    options: ViewOptions,
    in_flight: Arc<AtomicBool>,
}

impl ForecastService {
    pub fn new(client: ForecastClient, options: ViewOptions) -> Self {
        Self {
            client,
            options,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build the client from the Supabase settings.
    pub fn from_config(config: &Config) -> Result<Self, ForecastError> {
        let client = ForecastClient::new(
            &config.supabase.url,
            &config.supabase.anon_key,
            &config.supabase.rpc_name,
            Duration::from_secs(config.supabase.timeout_secs),
        )?;
        Ok(Self::new(client, ViewOptions::from_config(config)))
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub(crate) fn try_begin(&self) -> Option<InFlight> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Refresh already in flight, skipping trigger");
            return None;
        }
        Some(InFlight {
            flag: Arc::clone(&self.in_flight),
        })
    }

    /// Fetch and render one frame, unless a load is already in flight.
    pub async fn load(&self) -> LoadOutcome {
        let Some(_guard) = self.try_begin() else {
            return LoadOutcome::Skipped;
        };
        LoadOutcome::Loaded(self.fetch_frame().await)
    }

    /// Start a load on a background task.
    /// Sends `Loading` then `Done` on the channel; sends nothing when skipped.
    pub fn request_load(
        self: &Arc<Self>,
        tx: &mpsc::UnboundedSender<ForecastServiceMessage>,
    ) {
        let Some(guard) = self.try_begin() else {
            return;
        };

        let _ = tx.send(ForecastServiceMessage::Loading);

        let service = Arc::clone(self);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _guard = guard;
            let frame = service.fetch_frame().await;
            let _ = tx.send(ForecastServiceMessage::Done(frame));
        });
    }

    async fn fetch_frame(&self) -> Frame {
        let result = self.client.fetch_latest().await;
        present(self.options, self.client.rpc_name(), result)
    }
}

/// Turn a fetch result into a frame for the configured view.
pub fn present(
    options: ViewOptions,
    rpc_name: &str,
    result: Result<Option<LatestRow>, ForecastError>,
) -> Frame {
    let rendered = result.and_then(|row| {
        let body = match options.view {
            ViewMode::Raw => render::render_raw(row.as_ref()),
            ViewMode::Grid => render::render_grid(&model_from_row(row.as_ref())?),
            ViewMode::Cards => {
                render::render_cards(&model_from_row(row.as_ref())?, options.expand_all)
            }
        };
        Ok((row, body))
    });

    match rendered {
        Ok((row, body)) => Frame {
            status: Status::updated(row.as_ref()),
            body,
        },
        Err(error) => {
            let status = Status::failed(&error, rpc_name);
            let app_error = error_mapping::app_error(error, rpc_name);
            tracing::error!(
                error = %app_error,
                status = %status,
                hint = app_error.user_message(),
                "Loading forecast failed"
            );
            Frame {
                status,
                body: String::new(),
            }
        }
    }
}
