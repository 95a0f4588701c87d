use std::io::{self, IsTerminal};

use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use env_logger::Env;
use log::{info, warn};
use quickread_core::{
    app::{InputEffect, PlaybackPhase, ReaderConfig, ReaderController},
    content::TextProvider,
    input::{InputProvider, MockInput},
    platform::{Platform, PlatformBridge},
    render::DisplaySink,
    settings::SettingsStore,
};
use quickread_host::{
    input::keyboard::KeyboardInput,
    platform::{DocumentSource, desktop_platform},
    render::{LineDisplay, TerminalDisplay, TerminalGuard},
    storage::settings_file::SettingsFile,
};

use cli::Cli;
use settings_sync::SettingsSyncState;
use wpm_report::WpmReport;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/wpm_report.rs"]
mod wpm_report;

const LOOP_INTERVAL_MS: u64 = 5;
const SETTINGS_RETRY_MS: u64 = 2_000;
const WPM_REPORT_INTERVAL_MS: u64 = 5_000;

/// How a session ends besides the reader finishing.
trait SessionInput: InputProvider {
    fn quit_requested(&self) -> bool;

    /// New output width, if the terminal was resized.
    fn take_resize(&mut self) -> Option<u16> {
        None
    }
}

impl SessionInput for KeyboardInput {
    fn quit_requested(&self) -> bool {
        KeyboardInput::quit_requested(self)
    }

    fn take_resize(&mut self) -> Option<u16> {
        KeyboardInput::take_resize(self)
    }
}

impl SessionInput for MockInput {
    fn quit_requested(&self) -> bool {
        false
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn build_reader<D: DisplaySink, S: SettingsStore>(
    display: D,
    store: &mut S,
    cli: &Cli,
) -> ReaderController<D> {
    let mut app = ReaderController::new(display, ReaderConfig::default());

    match store.load() {
        Ok(stored) => app.apply_stored_settings(stored),
        Err(err) => warn!("settings: load failed, using defaults: {:?}", err),
    }

    if let Some(wpm) = cli.wpm {
        app.set_wpm(wpm as u32);
    }
    if let Some(enabled) = cli.chunking() {
        app.set_chunking(enabled);
    }

    app
}

async fn run<I, D, P>(
    app: &mut ReaderController<D>,
    input: &mut I,
    bridge: &mut PlatformBridge<P>,
    autostart: bool,
) where
    I: SessionInput,
    D: DisplaySink,
    P: Platform,
{
    let mut settings_sync = SettingsSyncState::new(app.persisted_settings());
    let mut report = WpmReport::new(now_ms());

    info!(
        "Reader started: wpm={} chunking={} autostart={}",
        app.wpm().get(),
        app.chunking_enabled(),
        autostart
    );

    if autostart && let Some(outcome) = app.run_start(bridge, now_ms).await {
        info!("reader: autostart {:?}", outcome);
    }

    loop {
        let now = now_ms();

        match input.poll_event() {
            Ok(Some(event)) => {
                if let InputEffect::FetchRequested(ticket) = app.apply_input(event, now) {
                    let text = match bridge.selected_text().await {
                        Ok(text) => text,
                        Err(err) => {
                            warn!("reader: text provider failed: {:?}", err);
                            String::new()
                        }
                    };
                    app.complete_fetch(ticket, &text, now_ms());
                }
            }
            Ok(None) => {}
            Err(err) => warn!("input: poll failed: {:?}", err),
        }

        if input.quit_requested() {
            info!("Reader stopped by user");
            break;
        }

        if let Some(columns) = input.take_resize() {
            app.resize_display(columns);
        }

        let now = now_ms();
        let playing = app.is_playing();
        app.tick(now);

        settings_sync.track_current(app.persisted_settings(), now);
        settings_sync.flush_if_due(bridge, now);

        report.record(app.drain_word_updates(), playing, now);

        if autostart && matches!(app.phase(), PlaybackPhase::Finished | PlaybackPhase::Empty) {
            break;
        }

        // Wake for the next chunk on time instead of up to a poll late.
        let wait_ms = app
            .state()
            .next_deadline_ms()
            .map_or(LOOP_INTERVAL_MS, |deadline| {
                deadline.saturating_sub(now_ms()).min(LOOP_INTERVAL_MS)
            });
        Timer::after_millis(wait_ms).await;
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let cli = Cli::parse();
    let plain = cli.plain || cli.reads_stdin() || !io::stdout().is_terminal();

    // Log lines would tear the full-screen view, so it only hears warnings by default.
    let default_filter = if plain { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if cli.demo {
        info!("platform: demo mode");
    }
    let platform = desktop_platform(
        cli.document.clone().map(DocumentSource::from_arg),
        cli.select.clone(),
        cli.settings_path().map(SettingsFile::new),
    );
    let mut bridge = PlatformBridge::new(platform);

    if plain {
        let mut app = build_reader(LineDisplay::new(io::stdout()), &mut bridge, &cli);
        run(&mut app, &mut MockInput::new(), &mut bridge, true).await;
    } else {
        let guard = match TerminalGuard::enter() {
            Ok(guard) => guard,
            Err(err) => {
                eprintln!("quickread: cannot set up the terminal: {err}");
                std::process::exit(1);
            }
        };

        let mut app = build_reader(TerminalDisplay::stdout(), &mut bridge, &cli);
        run(&mut app, &mut KeyboardInput::new(), &mut bridge, false).await;
        drop(guard);
    }

    std::process::exit(0);
}
