//! Existence resolvers.

use super::Stage;
use crate::actor_framework::Entity;
use crate::error::ApiError;

/// Looks up the routed id in the store and attaches the hit to the context.
///
/// Must precede any stage that calls [`Context::resolved`](super::Context::resolved).
pub fn resolve_by_id<T: Entity>() -> Stage<T> {
    Stage::new("resolve_by_id", |request, context, store| {
        let id = request
            .route_id()
            .ok_or_else(|| ApiError::Internal(format!("{} route carries no id", T::KIND)))?;
        match store.find(id) {
            Some(item) => Ok(context.with_resolved(item)),
            None => Err(ApiError::NotFound(format!("{} ID not found: {id}", T::KIND))),
        }
    })
}
