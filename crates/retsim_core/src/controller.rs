//! Event-driven controller for interactive front ends
//!
//! The controller turns UI events into simulation runs:
//! - initial load runs immediately
//! - parameter edits are debounced, so only the last edit in a burst runs
//! - regeneration starts a new seed epoch and runs immediately
//!
//! Every run re-emits the full outcome (or the validation errors) to a
//! [`Presenter`]. Runs never overlap: everything happens on the caller's
//! thread inside `load`, `regenerate` or `tick`.

use std::time::{Duration, Instant};

use crate::error::{SimulationError, ValidationError};
use crate::model::{SimulationOutcome, SimulationParameters};
use crate::scheduler::{Debouncer, Scheduler};
use crate::session::SimulationSession;

/// Consumer of simulation output (charts, tables, text)
pub trait Presenter {
    /// Called after every successful run with the complete outcome
    fn present(&mut self, outcome: &SimulationOutcome);

    /// Called instead of `present` when the requested parameters are invalid
    fn present_errors(&mut self, errors: &[ValidationError]);
}

/// State the scheduled recompute task runs against
struct ControllerState<P> {
    session: SimulationSession,
    requested: SimulationParameters,
    presenter: P,
    last_outcome: Option<SimulationOutcome>,
    runs: u64,
}

impl<P: Presenter> ControllerState<P> {
    fn recompute(&mut self) {
        self.runs += 1;
        match self.session.run(&self.requested) {
            Ok(outcome) => {
                self.presenter.present(&outcome);
                self.last_outcome = Some(outcome);
            }
            Err(SimulationError::InvalidParameters(errors)) => {
                tracing::debug!(count = errors.len(), "Rejected simulation parameters");
                self.presenter.present_errors(&errors);
                self.last_outcome = None;
            }
            Err(e) => {
                // The session extends samples before simulating
                tracing::error!(error = %e, "Simulation failed");
                self.last_outcome = None;
            }
        }
    }
}

pub struct SimulationController<P> {
    state: ControllerState<P>,
    scheduler: Scheduler<ControllerState<P>>,
    debouncer: Debouncer,
}

impl<P: Presenter + 'static> SimulationController<P> {
    #[must_use]
    pub fn new(session: SimulationSession, params: SimulationParameters, presenter: P) -> Self {
        Self {
            state: ControllerState {
                session,
                requested: params,
                presenter,
                last_outcome: None,
                runs: 0,
            },
            scheduler: Scheduler::new(),
            debouncer: Debouncer::default(),
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Initial run with the starting parameters
    pub fn load(&mut self) {
        self.state.recompute();
    }

    /// Record a parameter edit; the run happens once edits settle
    pub fn set_params(&mut self, now: Instant, params: SimulationParameters) {
        self.state.requested = params;
        self.debouncer
            .schedule(&mut self.scheduler, now, |state: &mut ControllerState<P>| {
                state.recompute();
            });
    }

    /// Start a new seed epoch and run immediately with the latest parameters.
    ///
    /// A pending debounced run is cancelled since this run covers it.
    pub fn regenerate(&mut self) -> u64 {
        self.debouncer.cancel(&mut self.scheduler);
        let epoch = self.state.session.regenerate();
        tracing::info!(epoch, "Regenerating random sequence");
        self.state.recompute();
        epoch
    }

    /// Fire any due work. Returns the number of runs performed.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.scheduler.run_due(now, &mut self.state)
    }

    /// When the next debounced run is due, if any
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    #[must_use]
    pub fn has_pending_run(&self) -> bool {
        self.debouncer.is_pending(&self.scheduler)
    }

    /// Latest requested parameters (possibly not yet run)
    #[must_use]
    pub fn params(&self) -> &SimulationParameters {
        &self.state.requested
    }

    #[must_use]
    pub fn session(&self) -> &SimulationSession {
        &self.state.session
    }

    /// Outcome of the most recent run, `None` if it was rejected
    #[must_use]
    pub fn last_outcome(&self) -> Option<&SimulationOutcome> {
        self.state.last_outcome.as_ref()
    }

    /// Total runs attempted, including rejected ones
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.state.runs
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.state.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.state.presenter
    }

    #[must_use]
    pub fn into_presenter(self) -> P {
        self.state.presenter
    }
}
