use axum::Router;
use tracing::{error, info};
use uuid::Uuid;

use super::{Seed, StartupError};
use crate::actor_framework::ResourceActor;
use crate::clients::{DishClient, OrderClient};
use crate::domain::{Dish, Order};
use crate::http::{self, AppState};
use crate::store::MemoryStore;

/// Random 128-bit id rendered as 32 lowercase hex characters.
pub fn random_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The main application system that owns both resource actors.
///
/// Responsible for starting the actors, wiring clients into the HTTP router,
/// and waiting for the actors on shutdown.
pub struct GrubdashSystem {
    pub dish_client: DishClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl GrubdashSystem {
    pub fn new(buffer_size: usize, seed: Seed) -> Self {
        Self::with_id_generator(buffer_size, seed, random_id)
    }

    /// Like [`GrubdashSystem::new`] but with a caller-supplied id generator,
    /// shared by both resources.
    pub fn with_id_generator<F>(buffer_size: usize, seed: Seed, next_id: F) -> Self
    where
        F: Fn() -> String + Clone + Send + Sync + 'static,
    {
        info!(
            dishes = seed.dishes.len(),
            orders = seed.orders.len(),
            "Starting grubdash system"
        );

        // 1. Dish actor
        let (dish_actor, dish_resource_client) = ResourceActor::<Dish>::new(
            buffer_size,
            MemoryStore::with_items(seed.dishes),
            next_id.clone(),
        );
        let dish_client = DishClient::new(dish_resource_client);
        let dish_handle = tokio::spawn(dish_actor.run());

        // 2. Order actor
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(
            buffer_size,
            MemoryStore::with_items(seed.orders),
            next_id,
        );
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            dish_client,
            order_client,
            handles: vec![dish_handle, order_handle],
        }
    }

    pub fn router(&self) -> Router {
        http::router(AppState {
            dishes: self.dish_client.clone(),
            orders: self.order_client.clone(),
        })
    }

    /// Drops the clients held here and waits for the actors to drain.
    ///
    /// Actors stop once every client is gone, so any router built from this
    /// system must be dropped first.
    pub async fn shutdown(self) -> Result<(), StartupError> {
        info!("Shutting down system...");
        drop(self.dish_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StartupError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
