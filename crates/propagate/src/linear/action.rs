/// Actions an observer can take during propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop before evaluating the remaining partial derivatives.
    ///
    /// The returned propagation carries the variance accumulated so far and
    /// is marked [`Status::StoppedByObserver`](super::Status::StoppedByObserver).
    StopEarly,
}
