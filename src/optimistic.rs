//! Apply a change locally, confirm it remotely, and undo it if confirmation fails.

use std::future::Future;

/// Snapshot taken before an optimistic change. Settle it once the remote side answers.
#[must_use = "an optimistic change must be settled"]
pub struct Rollback<T> {
    snapshot: T,
}

/// Snapshot `state`, then mutate it in place.
pub fn apply<T: Clone>(state: &mut T, mutate: impl FnOnce(&mut T)) -> Rollback<T> {
    let snapshot = state.clone();
    mutate(state);
    Rollback { snapshot }
}

impl<T> Rollback<T> {
    /// Keep the change on success; restore the whole snapshot on failure.
    pub fn settle<E>(self, state: &mut T, outcome: Result<(), E>) -> Result<(), E> {
        if outcome.is_err() {
            *state = self.snapshot;
        }
        outcome
    }
}

/// [`apply`] followed by awaiting `confirm` and settling with its result.
pub async fn apply_and_confirm<T, E, F>(
    state: &mut T,
    mutate: impl FnOnce(&mut T),
    confirm: F,
) -> Result<(), E>
where
    T: Clone,
    F: Future<Output = Result<(), E>>,
{
    let rollback = apply(state, mutate);
    let outcome = confirm.await;
    rollback.settle(state, outcome)
}
