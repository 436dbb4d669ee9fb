/// Hook called by a propagation at each step, returning an optional action.
///
/// `E` is the event type the routine emits (a nominal evaluation, a finished
/// partial derivative) and `A` the actions it understands. Returning `None`
/// leaves the propagation alone; returning an action such as "stop early" lets
/// a caller cap the number of model calls or enforce a deadline on a slow model
/// while the propagation API stays the same.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the observer
/// that never intervenes.
///
/// ```
/// use sigmaprop_core::Observer;
///
/// // Stop once three events have been seen.
/// let mut seen = 0;
/// let mut budget = |_: &&str| {
///     seen += 1;
///     (seen >= 3).then_some("stop")
/// };
///
/// assert_eq!(budget.observe(&"nominal"), None);
/// assert_eq!(budget.observe(&"partial 0"), None);
/// assert_eq!(budget.observe(&"partial 1"), Some("stop"));
/// ```
pub trait Observer<E, A> {
    /// Inspects one event; `Some(action)` asks the emitting routine to act on it.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Stop {
        Now,
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let mut observer = |event: &usize| {
            seen.push(*event);
            (*event == 2).then_some(Stop::Now)
        };

        assert_eq!(observer.observe(&1), None);
        assert_eq!(observer.observe(&2), Some(Stop::Now));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn unit_observer_never_acts() {
        let mut observer = ();
        let action: Option<Stop> = observer.observe(&"anything");
        assert!(action.is_none());
    }
}
