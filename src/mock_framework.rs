//! # Mock Framework
//!
//! Utilities for testing clients and the HTTP layer without a real actor.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers
//! like [`expect_get`] or [`expect_update`] to assert what was sent and to
//! reply with whatever the test needs.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::pipeline::Payload;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test owns, so replies (success, failure,
/// or never answering) are fully under the test's control.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Payload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { data, respond_to }) => Some((data, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Payload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            data,
            respond_to,
        }) => Some((id, data, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::DishClient;
    use crate::domain::Dish;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Dish>(10);
        let client = DishClient::new(inner);

        let create_task = tokio::spawn(async move {
            let mut data = Payload::new();
            data.insert("name".into(), json!("Taco"));
            client.create_dish(data).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.get("name"), Some(&json!("Taco")));
        let dish = Dish::new("d1", "Taco", "x", 5, "u");
        responder.send(Ok(dish.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(dish));
    }
}
