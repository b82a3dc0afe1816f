//! Mutation factory.
//!
//! A [`MutationDescriptor`] states the side-effect contract of one backend
//! write; [`Mutation`] runs it. On success the invalidation runs first, then
//! the success notification, then the caller's callback. On failure nothing
//! is invalidated: the error is logged, notified once, handed to the
//! caller's callback and returned. A reply that fails to decode still runs
//! the default or fixed-key invalidation, since the write itself went through.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    command,
    error::AppError,
    hub::Hub,
    invalidate::Invalidator,
    notify::messages,
    query::{QueryKey, Refetch, keys},
};

pub type InvalidateFn<V, R> = Arc<dyn Fn(&Invalidator, &V, &R) + Send + Sync>;

pub enum Invalidation<V, R> {
    /// The root accounts scope
    Default,
    Keys(Vec<QueryKey>),
    Routine(InvalidateFn<V, R>),
    Nothing,
}

pub struct MutationDescriptor<V, R> {
    pub command: &'static str,
    pub invalidation: Invalidation<V, R>,
    pub success_message: Option<&'static str>,
    pub error_message: &'static str,
    pub log_prefix: &'static str,
    /// Overrides the hub setting for eager refetch of mounted queries
    pub refetch_active: Option<bool>,
}

impl<V, R> MutationDescriptor<V, R> {
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            invalidation: Invalidation::Default,
            success_message: None,
            error_message: messages::COMMON_ERROR,
            log_prefix: command,
            refetch_active: None,
        }
    }

    pub fn invalidates(mut self, keys: Vec<QueryKey>) -> Self {
        self.invalidation = Invalidation::Keys(keys);
        self
    }

    pub fn invalidate_with<F>(mut self, routine: F) -> Self
    where
        F: Fn(&Invalidator, &V, &R) + Send + Sync + 'static,
    {
        self.invalidation = Invalidation::Routine(Arc::new(routine));
        self
    }

    pub fn no_invalidation(mut self) -> Self {
        self.invalidation = Invalidation::Nothing;
        self
    }

    pub fn success_message(mut self, key: &'static str) -> Self {
        self.success_message = Some(key);
        self
    }

    pub fn error_message(mut self, key: &'static str) -> Self {
        self.error_message = key;
        self
    }

    pub fn log_prefix(mut self, prefix: &'static str) -> Self {
        self.log_prefix = prefix;
        self
    }

    pub fn refetch_active(mut self, refetch: bool) -> Self {
        self.refetch_active = Some(refetch);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

struct MutationState<R> {
    in_flight: usize,
    last: MutationStatus,
    data: Option<R>,
    error: Option<AppError>,
}

fn lock<R>(state: &Mutex<MutationState<R>>) -> MutexGuard<'_, MutationState<R>> {
    // a poisoned lock only means a callback panicked, the state itself is still usable
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Counts one running `execute`; dropping it, also on cancellation, ends the run
struct InFlight<'a, R>(&'a Mutex<MutationState<R>>);

impl<'a, R> InFlight<'a, R> {
    fn start(state: &'a Mutex<MutationState<R>>) -> Self {
        lock(state).in_flight += 1;
        Self(state)
    }
}

impl<R> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        let mut state = lock(self.0);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

type SuccessCallback<R> = Box<dyn Fn(&R) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&AppError) + Send + Sync>;

pub struct Mutation<V, R> {
    hub: Hub,
    descriptor: MutationDescriptor<V, R>,
    on_success: Option<SuccessCallback<R>>,
    on_error: Option<ErrorCallback>,
    state: Mutex<MutationState<R>>,
}

/// Build a runnable mutation from its descriptor
pub fn mutation<V, R>(hub: &Hub, descriptor: MutationDescriptor<V, R>) -> Mutation<V, R> {
    Mutation {
        hub: hub.clone(),
        descriptor,
        on_success: None,
        on_error: None,
        state: Mutex::new(MutationState {
            in_flight: 0,
            last: MutationStatus::Idle,
            data: None,
            error: None,
        }),
    }
}

impl<V, R> Mutation<V, R>
where
    V: Serialize + Send + Sync,
    R: DeserializeOwned + Clone + Send + Sync,
{
    pub fn on_success(mut self, f: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&AppError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn descriptor(&self) -> &MutationDescriptor<V, R> {
        &self.descriptor
    }

    /// Run the remote call and its side effects. Concurrent calls are allowed
    /// and are not de-duplicated.
    #[tracing::instrument(name = "mutation::execute", skip_all, fields(command = self.descriptor.command))]
    pub async fn execute(&self, vars: V) -> Result<R, AppError> {
        let _in_flight = InFlight::start(&self.state);

        let result = match command::call_raw(self.hub.client(), self.descriptor.command, &vars).await {
            Ok(raw) => command::decode::<R>(raw).inspect_err(|_| {
                // the write went through, only its reply is unreadable
                self.apply_scope_invalidation();
            }),
            Err(e) => Err(e),
        };

        match result {
            Ok(data) => {
                self.apply_invalidation(&vars, &data);
                if let Some(key) = self.descriptor.success_message {
                    self.hub.notifier().success(key);
                }
                if let Some(f) = &self.on_success {
                    f(&data);
                }
                self.with_state(|s| {
                    s.last = MutationStatus::Success;
                    s.data = Some(data.clone());
                    s.error = None;
                });
                Ok(data)
            }
            Err(error) => {
                tracing::error!(
                    prefix = self.descriptor.log_prefix,
                    error = %error,
                    code = ?error.code,
                    "{} failed",
                    self.descriptor.log_prefix
                );
                self.hub
                    .notifier()
                    .error(self.descriptor.error_message, &error);
                if let Some(f) = &self.on_error {
                    f(&error);
                }
                self.with_state(|s| {
                    s.last = MutationStatus::Error;
                    s.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    fn invalidator(&self) -> Invalidator {
        let eager = self
            .descriptor
            .refetch_active
            .unwrap_or(self.hub.settings().refetch_active);
        let refetch = if eager { Refetch::Active } else { Refetch::None };
        Invalidator::new(self.hub.queries().clone(), refetch)
    }

    fn apply_invalidation(&self, vars: &V, data: &R) {
        match &self.descriptor.invalidation {
            Invalidation::Routine(routine) => routine(&self.invalidator(), vars, data),
            _ => self.apply_scope_invalidation(),
        }
    }

    /// Invalidation that needs no result: the default scope or fixed keys
    fn apply_scope_invalidation(&self) {
        match &self.descriptor.invalidation {
            Invalidation::Default => {
                self.invalidator().keys(&[keys::accounts::all()]);
            }
            Invalidation::Keys(scopes) => {
                self.invalidator().keys(scopes);
            }
            Invalidation::Routine(_) | Invalidation::Nothing => {}
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MutationState<R>) -> T) -> T {
        f(&mut lock(&self.state))
    }

    pub fn status(&self) -> MutationStatus {
        self.with_state(|s| {
            if s.in_flight > 0 {
                MutationStatus::Pending
            } else {
                s.last
            }
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MutationStatus::Pending
    }

    /// Result of the last successful run
    pub fn data(&self) -> Option<R> {
        self.with_state(|s| s.data.clone())
    }

    /// Error of the last run, cleared by the next success
    pub fn error(&self) -> Option<AppError> {
        self.with_state(|s| s.error.clone())
    }

    pub fn reset(&self) {
        self.with_state(|s| {
            s.last = MutationStatus::Idle;
            s.data = None;
            s.error = None;
        });
    }
}
