use crate::app_core::AppCore;
use crate::background::InlineTasks;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::navigation::Location;
use crate::services::Services;
use crate::state::AppState;
use crate::ui::screens::Screen;
use moneymap_auth::MemoryStore;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Drives the app core with in-memory storage and inline tasks.
///
/// Every event a command produces is reduced before the call returns, so
/// assertions can follow a key press directly.
pub struct TestApp {
    core: AppCore<InlineTasks>,
    storage: MemoryStore,
    data_rx: UnboundedReceiver<DataEvent>,
}

impl TestApp {
    /// Create a new test app on the home page with an empty store
    pub fn new() -> Self {
        Self::start_at("/")
    }

    /// Create a test app that was opened at `path`
    pub fn start_at(path: &str) -> Self {
        Self::start_with(MemoryStore::new(), path)
    }

    /// Start against storage left behind by an earlier run
    pub fn start_with(storage: MemoryStore, path: &str) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        let services = Services::new(
            std::sync::Arc::new(storage.clone()),
            std::time::Duration::ZERO,
            data_tx,
        );
        services.theme.init(false);

        let mut app = Self {
            core: AppCore::new(services, InlineTasks::new()),
            storage,
            data_rx,
        };
        app.core.start(Location::parse(path));
        app.drain();
        app
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.send_key_event(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
        self.drain();
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type into whichever field has focus
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
        self.drain();
    }

    /// Inject a data event (simulate a finished background task)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
        self.drain();
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    pub fn services(&self) -> &Services {
        self.core.services()
    }

    /// The durable store behind every service
    pub fn storage(&self) -> &MemoryStore {
        &self.storage
    }

    pub fn location(&self) -> &Location {
        self.state().location()
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }

    fn drain(&mut self) {
        while let Ok(event) = self.data_rx.try_recv() {
            self.core.handle_data_event(event);
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
