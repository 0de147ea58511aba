//! # Validation Pipelines
//!
//! A pipeline is an ordered list of [`Stage`]s. Each stage receives the
//! incoming [`Request`] and the [`Context`] built so far, and either hands
//! back a (possibly enriched) context or fails with an [`ApiError`]. The
//! first failure ends the run; later stages never see the request.
//!
//! Stages come in two flavours:
//!
//! - **Primitives** (see [`validate`]) inspect one field of the payload and
//!   leave the context untouched.
//! - **Resolvers** (see [`resolve`]) look the routed entity up in the store
//!   and attach it to the context for the stages after them.
//!
//! Pipelines hold no `await` points. They run inside a resource actor's loop,
//! which is what serializes access to the store.

pub mod resolve;
pub mod validate;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::actor_framework::Entity;
use crate::error::ApiError;
use crate::store::Store;

/// The object found under the `data` key of a request body.
pub type Payload = Map<String, Value>;

/// What a stage gets to see about the incoming call.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    route_id: Option<&'a str>,
    data: &'a Payload,
}

impl<'a> Request<'a> {
    pub fn new(route_id: Option<&'a str>, data: &'a Payload) -> Self {
        Self { route_id, data }
    }

    /// The `:dishId` / `:orderId` path segment, if the route has one.
    pub fn route_id(&self) -> Option<&'a str> {
        self.route_id
    }

    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.data.get(name)
    }
}

/// Request-scoped state threaded through a pipeline run.
#[derive(Debug, Clone)]
pub struct Context<T> {
    resolved: Option<T>,
}

impl<T: Entity> Context<T> {
    pub fn new() -> Self {
        Self { resolved: None }
    }

    pub fn with_resolved(self, item: T) -> Self {
        Self {
            resolved: Some(item),
        }
    }

    /// The entity attached by a resolver.
    ///
    /// # Errors
    /// Returns [`ApiError::Internal`] when no resolver ran earlier in the
    /// pipeline. That is a wiring mistake, never a caller mistake.
    pub fn resolved(&self) -> Result<&T, ApiError> {
        self.resolved.as_ref().ok_or_else(unresolved::<T>)
    }

    pub fn into_resolved(self) -> Result<T, ApiError> {
        self.resolved.ok_or_else(unresolved::<T>)
    }
}

impl<T: Entity> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn unresolved<T: Entity>() -> ApiError {
    ApiError::Internal(format!("{} was read before it was resolved", T::KIND))
}

type CheckFn<T> =
    dyn Fn(&Request<'_>, Context<T>, &dyn Store<T>) -> Result<Context<T>, ApiError> + Send + Sync;

/// One named step of a pipeline.
pub struct Stage<T> {
    name: String,
    check: Box<CheckFn<T>>,
}

impl<T: Entity> Stage<T> {
    /// A stage with full access to the context and the store.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Request<'_>, Context<T>, &dyn Store<T>) -> Result<Context<T>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    /// A predicate stage: reads the request and context, changes nothing.
    pub fn predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Request<'_>, &Context<T>) -> Result<(), ApiError> + Send + Sync + 'static,
    {
        Self::new(name, move |request, context, _store| {
            predicate(request, &context)?;
            Ok(context)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> std::fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// Ordered stages for one operation on one resource.
#[derive(Debug)]
pub struct Pipeline<T> {
    stages: Vec<Stage<T>>,
}

impl<T: Entity> Pipeline<T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn stage(mut self, stage: Stage<T>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Runs every stage in declared order and returns the final context.
    ///
    /// # Errors
    /// The error of the first stage that rejects the request.
    pub fn run(&self, request: &Request<'_>, store: &dyn Store<T>) -> Result<Context<T>, ApiError> {
        let mut context = Context::new();
        for stage in &self.stages {
            context = match (stage.check)(request, context, store) {
                Ok(next) => {
                    debug!(stage = %stage.name, "Stage passed");
                    next
                }
                Err(error) => {
                    warn!(stage = %stage.name, error = %error, "Stage rejected request");
                    return Err(error);
                }
            };
        }
        Ok(context)
    }
}

impl<T: Entity> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The pipelines a resource exposes. `delete` is `None` for resources that
/// cannot be deleted.
#[derive(Debug)]
pub struct Pipelines<T> {
    pub create: Pipeline<T>,
    pub read: Pipeline<T>,
    pub update: Pipeline<T>,
    pub delete: Option<Pipeline<T>>,
}
