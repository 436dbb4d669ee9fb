use std::time::{Duration, Instant};

use sigmaprop_core::Observer;
use sigmaprop_propagate::linear::{Action, Event};
use sigmaprop_scenarios::StageEvent;
use tracing::{debug, warn};

/// Logs propagation progress and optionally stops once a deadline passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceObserver {
    deadline: Option<Instant>,
    expired: bool,
}

impl TraceObserver {
    /// Creates an observer that stops propagation after `timeout`, if given.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            deadline: timeout.map(|timeout| Instant::now() + timeout),
            expired: false,
        }
    }

    /// Borrows this observer as a closure the scenario functions accept.
    pub fn by_ref(&mut self) -> impl for<'a> FnMut(&StageEvent<'a>) -> Option<Action> + '_ {
        move |event: &StageEvent<'_>| self.observe(event)
    }

    /// Returns `true` if the deadline stopped any propagation.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expired
    }
}

impl Observer<StageEvent<'_>, Action> for TraceObserver {
    fn observe(&mut self, event: &StageEvent<'_>) -> Option<Action> {
        let stage = event.stage.label();
        let evaluations = event.event.evaluations();
        match event.event {
            Event::Nominal { snapshot } => {
                debug!(
                    stage,
                    x = ?snapshot.input,
                    value = snapshot.output,
                    evaluations,
                    "nominal evaluation"
                );
            }
            Event::Partial { partial, variance } => {
                debug!(
                    stage,
                    index = partial.index,
                    step = partial.step,
                    derivative = partial.derivative,
                    contribution = partial.contribution,
                    sigma = variance.sqrt(),
                    evaluations,
                    "partial derivative"
                );
            }
        }

        let deadline = self.deadline?;
        if Instant::now() < deadline {
            return None;
        }
        if !self.expired {
            warn!(stage, "deadline reached, stopping propagation");
            self.expired = true;
        }
        Some(Action::StopEarly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sigmaprop_propagate::linear::Config;
    use sigmaprop_scenarios::{
        radiocarbon::{self, RadiocarbonSample},
        time_of_death::{self, DeathCase},
    };

    #[test]
    fn without_deadline_never_stops() {
        let mut observer = TraceObserver::new(None);
        let date = radiocarbon::date(
            &RadiocarbonSample::default(),
            &Config::default(),
            observer.by_ref(),
        );
        assert!(date.is_ok());
        assert!(!observer.expired());
    }

    #[test]
    fn expired_deadline_stops_every_stage_at_nominal() {
        let mut observer = TraceObserver::new(Some(Duration::ZERO));
        let estimate =
            time_of_death::estimate(&DeathCase::default(), &Config::default(), observer.by_ref())
                .unwrap();

        assert!(observer.expired());
        assert!(estimate.cooling_constant.partials.is_empty());
        assert!(estimate.elapsed.partials.is_empty());
        assert_eq!(estimate.elapsed.sigma, 0.0);
    }
}
