//! The application state container.
//!
//! `RootState` is split into four slices, each owned by a pure reducer.
//! Synchronous callers use [`Store::dispatch`]; spawned thunks hold a
//! [`Dispatcher`] and their actions are applied by [`Store::drain`] on the
//! UI loop, in arrival order.

pub mod action;
pub mod auth;
pub mod offer;
pub mod offers;
pub mod reviews;
pub mod selectors;

#[cfg(test)]
mod fixtures;

use tokio::sync::mpsc;

pub use action::{Action, AuthAction, OfferAction, OffersAction, ReviewsAction};
pub use auth::AuthState;
pub use offer::OfferState;
pub use offers::OffersState;
pub use reviews::ReviewsState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub offers: OffersState,
    pub offer: OfferState,
    pub reviews: ReviewsState,
}

/// Apply every slice reducer to its own slice.
#[must_use]
pub fn reduce(state: RootState, action: &Action) -> RootState {
    RootState {
        auth: auth::reduce(state.auth, action),
        offers: offers::reduce(state.offers, action),
        offer: offer::reduce(state.offer, action),
        reviews: reviews::reduce(state.reviews, action),
    }
}

/// Sending half of the action queue, handed to thunks.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    /// Queue an action. Dropped silently once the store is gone.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        let kind = action.kind();
        if self.tx.send(action).is_err() {
            tracing::debug!(kind, "Store closed; action dropped");
        }
    }

    /// A detached dispatcher plus its receiver, for driving thunks in tests.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[derive(Debug)]
pub struct Store {
    state: RootState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(RootState::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(state: RootState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    #[must_use]
    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!(kind = action.kind(), "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
    }

    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.tx.clone(),
        }
    }

    /// Apply every queued action. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        self.drain_with(|_| {})
    }

    /// Like [`Store::drain`], showing each action to `observe` before it is
    /// reduced.
    pub fn drain_with(&mut self, mut observe: impl FnMut(&Action)) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            observe(&action);
            self.dispatch(action);
            applied += 1;
        }
        applied
    }
}
