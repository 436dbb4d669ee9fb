use sigmaprop_core::Observer;
use sigmaprop_propagate::linear::{Action, Event};

/// The propagation a [`StageEvent`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Radiocarbon age from half-life and remaining fraction.
    RadiocarbonAge,

    /// Cooling constant from ambient and two body readings.
    CoolingConstant,

    /// Time since death from the readings and the cooling constant.
    ElapsedTime,
}

impl Stage {
    /// Returns a short human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RadiocarbonAge => "radiocarbon age",
            Self::CoolingConstant => "cooling constant",
            Self::ElapsedTime => "elapsed time",
        }
    }
}

/// A propagator event tagged with the scenario stage that emitted it.
#[derive(Debug, Clone, Copy)]
pub struct StageEvent<'a> {
    pub stage: Stage,
    pub event: &'a Event<'a>,
}

/// Adapts a stage observer into a propagator observer for one stage.
pub(crate) fn staged<'o, Obs>(
    observer: &'o mut Obs,
    stage: Stage,
) -> impl for<'a> FnMut(&Event<'a>) -> Option<Action> + 'o
where
    Obs: for<'a> Observer<StageEvent<'a>, Action>,
{
    move |event: &Event<'_>| observer.observe(&StageEvent { stage, event })
}
