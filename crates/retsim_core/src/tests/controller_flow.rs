//! Controller behaviour: initial load, debounced edits, regeneration

use std::time::{Duration, Instant};

use crate::controller::{Presenter, SimulationController};
use crate::error::ValidationError;
use crate::model::{SimulationOutcome, SimulationParameters};
use crate::sampler::SamplerMethod;
use crate::session::SimulationSession;

#[derive(Default)]
struct RecordingPresenter {
    outcomes: Vec<SimulationOutcome>,
    errors: Vec<Vec<ValidationError>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, outcome: &SimulationOutcome) {
        self.outcomes.push(outcome.clone());
    }

    fn present_errors(&mut self, errors: &[ValidationError]) {
        self.errors.push(errors.to_vec());
    }
}

fn controller() -> SimulationController<RecordingPresenter> {
    SimulationController::new(
        SimulationSession::with_seed(5, SamplerMethod::BoxMuller),
        SimulationParameters::default(),
        RecordingPresenter::default(),
    )
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_load_presents_full_outcome() {
    let mut c = controller();
    c.load();

    let presented = &c.presenter().outcomes;
    assert_eq!(presented.len(), 1);
    assert_eq!(presented[0].returns().len(), 12);
    assert_eq!(presented[0].cumulative().len(), 13);
    assert_eq!(c.last_outcome(), Some(&presented[0]));
}

#[test]
fn test_burst_of_edits_runs_once_with_last_params() {
    let t0 = Instant::now();
    let mut c = controller();

    c.set_params(t0, SimulationParameters::new(4.0, 17.0, 12));
    c.set_params(t0 + ms(30), SimulationParameters::new(5.0, 17.0, 12));
    c.set_params(t0 + ms(60), SimulationParameters::new(6.0, 17.0, 12));

    // 100ms after the first edit: still settling
    assert_eq!(c.tick(t0 + ms(100)), 0);
    assert!(c.has_pending_run());
    assert_eq!(c.next_due(), Some(t0 + ms(160)));

    assert_eq!(c.tick(t0 + ms(160)), 1);
    assert!(!c.has_pending_run());

    let presented = &c.presenter().outcomes;
    assert_eq!(presented.len(), 1);
    assert_eq!(presented[0].params().drift, 6.0);
    assert_eq!(c.runs(), 1);
}

#[test]
fn test_invalid_edit_presents_errors_only() {
    let t0 = Instant::now();
    let mut c = controller();
    c.load();

    c.set_params(t0, SimulationParameters::new(3.0, 17.0, 121));
    c.tick(t0 + ms(100));

    let presenter = c.presenter();
    assert_eq!(presenter.outcomes.len(), 1);
    assert_eq!(presenter.errors.len(), 1);
    assert_eq!(
        presenter.errors[0],
        vec![ValidationError::HorizonOutOfRange { value: 121 }]
    );
    assert!(c.last_outcome().is_none());
}

#[test]
fn test_regenerate_runs_now_and_cancels_pending_edit() {
    let t0 = Instant::now();
    let mut c = controller();
    c.load();

    c.set_params(t0, SimulationParameters::new(9.0, 17.0, 12));
    let epoch = c.regenerate();
    assert_eq!(epoch, 1);
    assert!(!c.has_pending_run());

    // The regenerated run already used the edited params
    let latest = c.last_outcome().unwrap();
    assert_eq!(latest.epoch(), 1);
    assert_eq!(latest.params().drift, 9.0);

    assert_eq!(c.tick(t0 + ms(500)), 0);
    assert_eq!(c.presenter().outcomes.len(), 2);
}

#[test]
fn test_custom_debounce_delay() {
    let t0 = Instant::now();
    let mut c = controller().with_debounce(ms(250));

    c.set_params(t0, SimulationParameters::new(4.0, 10.0, 6));
    assert_eq!(c.tick(t0 + ms(200)), 0);
    assert_eq!(c.tick(t0 + ms(250)), 1);
    assert_eq!(c.params().horizon_months, 6);
}
