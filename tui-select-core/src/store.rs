//! Host-side state store with reducer pattern
//!
//! Select fields are fully controlled: the selected value and the open flag
//! belong to the host. The store is where a host keeps them.

use crate::Action;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// State container with a reducer
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct FormState {
///     country: Option<String>,
///     country_open: bool,
/// }
///
/// fn reducer(state: &mut FormState, action: FormAction) -> bool {
///     match action {
///         FormAction::CountryOpen => state.country_open = true,
///         FormAction::CountryDismiss => state.country_open = false,
///         FormAction::CountrySet(code) => state.country = Some(code),
///     }
///     true
/// }
///
/// let mut store = Store::new(FormState::default(), reducer);
/// store.dispatch(FormAction::CountryOpen);
/// assert!(store.state().country_open);
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: Option<Box<dyn Middleware<A>>>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            middleware: None,
        }
    }

    /// Attach middleware that observes every dispatch
    pub fn with_middleware(mut self, middleware: impl Middleware<A> + 'static) -> Self {
        self.middleware = Some(Box::new(middleware));
        self
    }

    /// Dispatch an action to the reducer
    ///
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        match self.middleware.as_mut() {
            Some(middleware) => {
                middleware.before(&action);
                let changed = (self.reducer)(&mut self.state, action.clone());
                middleware.after(&action, changed);
                changed
            }
            None => (self.reducer)(&mut self.state, action),
        }
    }

    /// Dispatch actions in order, returning whether any changed state
    ///
    /// Use this for everything a component returns from one `handle_event`
    /// call; order matters (a selection is applied before the dismiss).
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) || changed)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Prefer dispatching actions; this is for initialization.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

/// Middleware for intercepting actions around the reducer
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
