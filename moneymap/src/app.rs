use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use moneymap_auth::Settings;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_core::AppCore;
use crate::appearance;
use crate::background::color_scheme::{self, EnvColorScheme};
use crate::background::BackgroundTaskManager;
use crate::input::KeyEvent;
use crate::navigation::Location;
use crate::services::Services;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    settings: Settings,
    start: Location,
}

impl App {
    pub fn new(settings: Settings, start: Location) -> Self {
        Self { settings, start }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!("moneymap starting");

        let storage = self.settings.open_storage()?;
        tracing::info!("Using storage at {}", storage.root().display());

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let services = Services::new(
            Arc::new(storage),
            self.settings.simulated_latency(),
            data_tx.clone(),
        );

        let os_prefers_dark = appearance::os_prefers_dark();
        services.theme.init(os_prefers_dark);
        let mut theme_rx = services.theme.subscribe();

        let watcher = tokio::spawn(color_scheme::watch_color_scheme(
            EnvColorScheme,
            os_prefers_dark,
            color_scheme::POLL_INTERVAL,
            data_tx,
        ));

        let mut core = AppCore::new(services, BackgroundTaskManager::new());
        core.start(self.start.clone());

        let mut terminal = self.init()?;
        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            terminal.draw(|f| {
                crate::ui::render_app(f, core.state());
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    let state = core.state_mut();
                    state.expire_status(Instant::now());
                    if let Some(throbber_state) = state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    core.handle_data_event(data_event);
                }
                Ok(()) = theme_rx.changed() => {
                    let effective = *theme_rx.borrow_and_update();
                    tracing::debug!("Effective theme is now {:?}", effective);
                    let snapshot = core.services().theme.snapshot();
                    core.state_mut().appearance = snapshot;
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        core.shutdown();
        watcher.abort();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
