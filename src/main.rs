use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use getij_core::{App, Config, Overrides, ViewMode};
use getij_ui::{
    input, ForecastService, ForecastServiceMessage, Frame, InputEvent, LoadOutcome, Status,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Surf forecast viewer for the latest processed SMS row
#[derive(Parser, Debug)]
#[command(name = "getij")]
#[command(about = "Shows the latest surf forecast per location, day and daypart")]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to render: raw, grid or cards
    #[arg(long)]
    view: Option<ViewMode>,

    /// Auto-refresh interval in minutes (0 disables)
    #[arg(long)]
    refresh_minutes: Option<u32>,

    /// Load once, print and exit
    #[arg(long)]
    once: bool,

    /// Expand every day in the cards view
    #[arg(long)]
    expand_all: bool,
}

impl Args {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path, |key| std::env::var(key).ok())?,
            None => Config::load()?,
        };

        config.apply_overrides(&Overrides {
            view: self.view,
            refresh_minutes: self.refresh_minutes,
            expand_all: self.expand_all,
        });

        config.check()?;
        Ok(config)
    }
}

fn print_status(status: &Status) {
    println!("{}", status);
}

fn print_frame(frame: &Frame) {
    print_status(&frame.status);
    if !frame.body.is_empty() {
        println!();
        println!("{}", frame.body);
    }
    println!();
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn run_once(service: &ForecastService) -> ExitCode {
    match service.load().await {
        LoadOutcome::Loaded(frame) => {
            print_frame(&frame);
            if frame.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        LoadOutcome::Skipped => ExitCode::FAILURE,
    }
}

async fn run_loop(app: &App, service: Arc<ForecastService>) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut timer = app.config().display.refresh_interval().map(|period| {
        let mut timer = tokio::time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    });

    let mut keys = input::spawn_reader(std::io::BufReader::new(std::io::stdin()));
    let mut keys_open = true;

    tracing::info!(
        auto_refresh = timer.is_some(),
        "Press Enter to refresh, q to quit"
    );
    service.request_load(&tx);

    loop {
        tokio::select! {
            Some(message) = rx.recv() => match message {
                ForecastServiceMessage::Loading => print_status(&Status::loading()),
                ForecastServiceMessage::Done(frame) => {
                    print_frame(&frame);
                    if !keys_open && timer.is_none() {
                        break;
                    }
                }
            },
            _ = next_tick(&mut timer) => {
                tracing::debug!("Auto-refresh");
                service.request_load(&tx);
            }
            event = keys.recv(), if keys_open => match event {
                Some(InputEvent::Quit) => break,
                Some(InputEvent::Refresh) => service.request_load(&tx),
                Some(InputEvent::Closed) | None => {
                    keys_open = false;
                    if timer.is_none() && !service.is_loading() {
                        break;
                    }
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    getij_core::init()?;

    let app = App::with_config(args.load_config()?);
    let service = Arc::new(ForecastService::from_config(app.config())?);

    let code = if args.once {
        run_once(&service).await
    } else {
        run_loop(&app, service).await;
        ExitCode::SUCCESS
    };

    app.shutdown();
    Ok(code)
}
