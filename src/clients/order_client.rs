use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::Order;
use crate::error::ApiError;

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(OrderClient, Order, order, orders);

impl OrderClient {
    /// Orders are the only resource that can be deleted, and only while pending.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: String) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
