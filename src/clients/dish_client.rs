use crate::actor_framework::ResourceClient;
use crate::domain::Dish;

/// Client for interacting with the Dish actor.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl_resource_client!(DishClient, Dish, dish, dishes);
