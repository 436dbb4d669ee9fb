//! Human-readable reports for scenario results.
//!
//! Each report is a borrowed view that renders through [`fmt::Display`], so it
//! can be printed directly or collected with `to_string`.

use std::fmt;

use jiff::civil::Time as ClockTime;
use sigmaprop_propagate::linear::{Propagation, Status};
use sigmaprop_scenarios::{
    clock::twelve_hour, radiocarbon::RadiocarbonDate, time_of_death::TimeOfDeath,
};
use uom::si::time::{hour, year};

const RADIOCARBON_INPUTS: [&str; 2] = ["half-life", "remaining fraction"];
const COOLING_INPUTS: [&str; 3] = ["ambient", "first reading", "second reading"];
const ELAPSED_INPUTS: [&str; 4] = [
    "ambient",
    "first reading",
    "body temperature",
    "cooling constant",
];

/// Report for a radiocarbon date.
#[derive(Debug, Clone, Copy)]
pub struct RadiocarbonReport<'a> {
    pub date: &'a RadiocarbonDate,
    pub budget: bool,
}

/// Report for a cooling constant on its own.
#[derive(Debug, Clone, Copy)]
pub struct CoolingReport<'a> {
    pub k: &'a Propagation,
    pub budget: bool,
}

/// Report for a time-of-death estimate, including its cooling constant.
#[derive(Debug, Clone, Copy)]
pub struct TimeOfDeathReport<'a> {
    pub estimate: &'a TimeOfDeath,
    pub discovered_at: ClockTime,
    pub budget: bool,
}

/// Each input's sigma contribution and share of the variance.
struct Budget<'a> {
    propagation: &'a Propagation,
    labels: &'a [&'a str],
}

impl fmt::Display for RadiocarbonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date;
        let age = date.age.value.get::<year>();
        let sigma = date.age.sigma.get::<year>();

        writeln!(f, "Remaining fraction: f = {:.4}", date.fraction)?;
        if let Some(half_life) = date.propagation.partials.first() {
            writeln!(
                f,
                "Half-life: T = {} ± {} years",
                half_life.value, half_life.sigma
            )?;
        }
        writeln!(
            f,
            "Estimated age: t = {age:.2} years (≈ {} years)",
            date.rounded_years()
        )?;
        writeln!(
            f,
            "Uncertainty: ±{sigma:.2} years ({:.2}%)",
            100.0 * date.propagation.relative_sigma()
        )?;

        if self.budget {
            write!(
                f,
                "{}",
                Budget {
                    propagation: &date.propagation,
                    labels: &RADIOCARBON_INPUTS,
                }
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CoolingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.k;
        writeln!(
            f,
            "Cooling constant: k = {:.5} ± {:.5} 1/h ({:.1}%)",
            k.value,
            k.sigma,
            100.0 * k.relative_sigma()
        )?;

        if self.budget {
            write!(
                f,
                "{}",
                Budget {
                    propagation: k,
                    labels: &COOLING_INPUTS,
                }
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeOfDeathReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = self.estimate;
        write!(
            f,
            "{}",
            CoolingReport {
                k: &estimate.cooling_constant,
                budget: self.budget,
            }
        )?;

        let tau = estimate.elapsed_time.value.get::<hour>();
        let sigma = estimate.elapsed_time.sigma.get::<hour>();
        let (hours, minutes) = estimate.elapsed_clock();
        writeln!(
            f,
            "Elapsed before {}: τ = {tau:.2} h (≈ {hours} h {minutes} min) ± {sigma:.2} h ({:.1}%)",
            twelve_hour(self.discovered_at),
            100.0 * estimate.elapsed.relative_sigma()
        )?;

        if self.budget {
            write!(
                f,
                "{}",
                Budget {
                    propagation: &estimate.elapsed,
                    labels: &ELAPSED_INPUTS,
                }
            )?;
        }
        writeln!(f, "Estimated time of death: {}", twelve_hour(estimate.death))
    }
}

impl fmt::Display for Budget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Uncertainty budget:")?;
        for partial in &self.propagation.partials {
            let label = self.labels.get(partial.index).copied().unwrap_or("input");
            let share = self
                .propagation
                .variance_fraction(partial.index)
                .unwrap_or(0.0);
            writeln!(
                f,
                "    {label:<18} {:>12.6}  {:>5.1}%",
                partial.contribution,
                100.0 * share
            )?;
        }
        if self.propagation.status == Status::StoppedByObserver {
            writeln!(
                f,
                "    (incomplete: stopped before every input was evaluated)"
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::time;
    use sigmaprop_propagate::linear::{Action, Config, Event};
    use sigmaprop_scenarios::{
        StageEvent,
        cooling::{CoolingReadings, cooling_constant},
        radiocarbon::{RadiocarbonSample, date_unobserved},
        time_of_death::{DeathCase, estimate_unobserved},
    };

    #[test]
    fn radiocarbon_report_for_default_sample() {
        let date = date_unobserved(&RadiocarbonSample::default(), &Config::default()).unwrap();
        let text = RadiocarbonReport {
            date: &date,
            budget: false,
        }
        .to_string();

        assert!(text.contains("f = 0.7745 ± 0.0010"), "{text}");
        assert!(text.contains("t = 2112.44 years (≈ 2112 years)"), "{text}");
        assert!(text.contains("±18.20 years (0.86%)"), "{text}");
        assert!(!text.contains("budget"));
    }

    #[test]
    fn time_of_death_report_for_default_case() {
        let estimate = estimate_unobserved(&DeathCase::default(), &Config::default()).unwrap();
        let text = TimeOfDeathReport {
            estimate: &estimate,
            discovered_at: time(21, 18, 0, 0),
            budget: false,
        }
        .to_string();

        assert!(text.contains("k = 0.15415 ± 0.03033 1/h (19.7%)"), "{text}");
        assert!(text.contains("Elapsed before 09:18 PM"), "{text}");
        assert!(text.contains("τ = 6.72 h (≈ 6 h 43 min) ± 1.34 h (20.0%)"), "{text}");
        assert!(text.contains("Estimated time of death: 02:35 PM"), "{text}");
    }

    #[test]
    fn budget_lists_every_input() {
        let estimate = estimate_unobserved(&DeathCase::default(), &Config::default()).unwrap();
        let text = TimeOfDeathReport {
            estimate: &estimate,
            discovered_at: time(21, 18, 0, 0),
            budget: true,
        }
        .to_string();

        for label in COOLING_INPUTS.iter().chain(&ELAPSED_INPUTS) {
            assert!(text.contains(label), "missing {label} in {text}");
        }
        assert_eq!(text.matches("Uncertainty budget").count(), 2);
        assert!(!text.contains("incomplete"));
    }

    #[test]
    fn budget_flags_a_stopped_propagation() {
        let stop_after_first = |event: &StageEvent<'_>| match event.event {
            Event::Partial { .. } => Some(Action::StopEarly),
            Event::Nominal { .. } => None,
        };
        let k = cooling_constant(
            &CoolingReadings::default(),
            &Config::default(),
            stop_after_first,
        )
        .unwrap();

        let text = CoolingReport {
            k: &k,
            budget: true,
        }
        .to_string();

        assert!(text.contains("ambient"), "{text}");
        assert!(!text.contains("second reading"), "{text}");
        assert!(text.contains("incomplete"), "{text}");
    }
}
