use crate::background::TaskSpawner;
use crate::commands::{executor, handlers};
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::navigation::Location;
use crate::services::Services;
use crate::state::AppState;

/// Testable application core without terminal dependencies
///
/// Generic over T (task spawner). In production tasks run on the tokio
/// runtime and report back through the data channel; in tests they run
/// inline so their events are ready as soon as the command returns.
pub struct AppCore<T: TaskSpawner> {
    ui_state: AppState,
    services: Services,
    tasks: T,
}

impl<T: TaskSpawner> AppCore<T> {
    /// Create a new application core over the given stores
    pub fn new(services: Services, tasks: T) -> Self {
        let mut ui_state = AppState::new();
        ui_state.appearance = services.theme.snapshot();
        ui_state.settings = services.preferences.load_settings();

        Self {
            ui_state,
            services,
            tasks,
        }
    }

    /// Show `location` (guarded) and start restoring the stored session
    pub fn start(&mut self, location: Location) {
        tracing::info!("Starting at {}", location);
        self.execute(AppCommand::Navigate {
            location,
            replace: true,
        });
        self.execute(AppCommand::RestoreSession);
    }

    /// Handle keyboard input and execute the resulting command
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::debug!("Executing command: {:?}", command);
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        executor::execute_command(command, &mut self.ui_state, &mut self.tasks, &self.services);
    }

    /// Handle a data event (for test injection or async results)
    pub fn handle_data_event(&mut self, event: DataEvent) {
        executor::process_data_event(event, &mut self.ui_state, &mut self.tasks, &self.services);
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }

    /// Cancel whatever is still running
    pub fn shutdown(&mut self) {
        self.tasks.cancel_all();
    }
}
