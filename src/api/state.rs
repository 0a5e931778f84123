//! Application state for the shift engine API.

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::ServiceConfig;
use crate::reporting::Reporter;
use crate::state_machine::ShiftMachine;
use crate::store::{ReportingStore, ShiftStore};

/// Shared application state.
///
/// Holds the shift state machine for worker-scoped transitions and the
/// reporter for the elevated read path.
#[derive(Clone)]
pub struct AppState {
    machine: Arc<ShiftMachine>,
    reporter: Arc<Reporter>,
}

impl AppState {
    /// Creates a new application state from its two services.
    pub fn new(machine: ShiftMachine, reporter: Reporter) -> Self {
        Self {
            machine: Arc::new(machine),
            reporter: Arc::new(reporter),
        }
    }

    /// Builds both services over one store that serves both access paths.
    pub fn from_config<S>(store: Arc<S>, clock: Arc<dyn Clock>, config: &ServiceConfig) -> Self
    where
        S: ShiftStore + ReportingStore + 'static,
    {
        let machine = ShiftMachine::from_config(store.clone(), clock.clone(), config);
        let reporter = Reporter::from_config(store, clock, config);
        Self::new(machine, reporter)
    }

    /// Returns the shift state machine.
    pub fn machine(&self) -> &ShiftMachine {
        &self.machine
    }

    /// Returns the reporter.
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }
}
