//! Request authentication and routing.
//!
//! The [`Dispatcher`] checks an `(id, Authorization header)` pair against the
//! [`TriggerRegistry`] and then either starts a run through the
//! [`TaskRunner`] or reads the task status from the store.
//!
//! Every refusal is reported as a [`DispatchError`]; the HTTP layer turns
//! all of them into the same `404`, so a wrong token is indistinguishable
//! from an unknown route.

use std::sync::Arc;

use hookrun_types::error::DispatchError;
use hookrun_types::task::{StatusReport, TriggerOutcome};
use hookrun_types::trigger::Trigger;

use crate::registry::TriggerRegistry;
use crate::task::executor::ScriptExecutor;
use crate::task::runner::TaskRunner;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticates requests and routes them to the runner or the store.
pub struct Dispatcher<E> {
    registry: Arc<TriggerRegistry>,
    runner: TaskRunner<E>,
}

impl<E: ScriptExecutor> Dispatcher<E> {
    pub fn new(registry: Arc<TriggerRegistry>, runner: TaskRunner<E>) -> Self {
        Self { registry, runner }
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn runner(&self) -> &TaskRunner<E> {
        &self.runner
    }

    /// Resolve the trigger addressed by `id`, verifying the bearer credential.
    pub fn authenticate(
        &self,
        id: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<&Trigger, DispatchError> {
        let (Some(id), Some(authorization)) = (id, authorization) else {
            return Err(DispatchError::NotMatched);
        };
        let Some(credential) = authorization.strip_prefix(BEARER_PREFIX) else {
            return Err(DispatchError::NotMatched);
        };
        let Some(trigger) = self.registry.find_by_id(id) else {
            return Err(DispatchError::NotMatched);
        };

        if !constant_time_eq(trigger.token.trim().as_bytes(), credential.trim().as_bytes()) {
            tracing::error!(
                trigger_id = %id,
                credential = %credential,
                "Invalid request for {id} with {credential}"
            );
            return Err(DispatchError::InvalidToken(id.to_string()));
        }

        Ok(trigger)
    }

    /// Authenticated trigger action: start (or coalesce) a run.
    pub fn trigger(
        &self,
        id: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<TriggerOutcome, DispatchError> {
        let trigger = self.authenticate(id, authorization)?;
        Ok(self.runner.trigger(trigger))
    }

    /// Authenticated status query.
    pub fn status(
        &self,
        id: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<StatusReport, DispatchError> {
        let trigger = self.authenticate(id, authorization)?;
        Ok(StatusReport {
            id: trigger.id.clone(),
            status: self.runner.store().status(&trigger.id),
        })
    }
}

/// Constant-time byte comparison (XOR-based).
///
/// Returns true if and only if `a == b`. Time taken does not depend on how
/// many leading bytes match; it still leaks the length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
