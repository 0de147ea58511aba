use std::fmt::Debug;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::pipeline::{Payload, Pipelines, Request};
use crate::store::Store;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource must implement to be served by a ResourceActor
pub trait Entity: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Name used in messages, e.g. "Dish must include a name".
    const KIND: &'static str;

    /// Fields extracted from a payload that passed validation.
    type Draft: Debug + Send;

    fn id(&self) -> &str;

    /// Build the draft from a payload that has already passed the pipeline.
    fn parse_draft(data: &Payload) -> Result<Self::Draft, ApiError>;

    /// Construct the full entity from a fresh id and a draft
    fn from_create(id: String, draft: Self::Draft) -> Self;

    /// Overwrite the mutable fields. The id never changes.
    fn on_update(&mut self, draft: Self::Draft);

    /// Validation pipelines for every operation on this resource
    fn pipelines() -> Pipelines<Self>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        data: Payload,
        respond_to: Response<T>,
    },
    Get {
        id: String,
        respond_to: Response<T>,
    },
    Update {
        id: String,
        data: Payload,
        respond_to: Response<T>,
    },
    Delete {
        id: String,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one resource's store and processes requests one at a time.
///
/// Pipelines and terminal handlers run synchronously between two `recv`
/// calls, so the store is never observed half-way through a request.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Box<dyn Store<T>>,
    pipelines: Pipelines<T>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        store: impl Store<T> + 'static,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: Box::new(store),
            pipelines: T::pipelines(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(kind = T::KIND))]
    pub async fn run(mut self) {
        info!("Actor starting");
        debug!(
            create = ?self.pipelines.create.stage_names(),
            update = ?self.pipelines.update.stage_names(),
            delete = ?self.pipelines.delete.as_ref().map(|p| p.stage_names()),
            "Pipelines wired"
        );
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(self.handle_list());
                }
                ResourceRequest::Create { data, respond_to } => {
                    let _ = respond_to.send(self.handle_create(data));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id));
                }
                ResourceRequest::Update { id, data, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, data));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
            }
        }
        info!("Actor stopped");
    }

    #[instrument(skip(self))]
    fn handle_list(&self) -> Result<Vec<T>, ApiError> {
        let items = self.store.list();
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    #[instrument(skip(self, data))]
    fn handle_create(&mut self, data: Payload) -> Result<T, ApiError> {
        debug!("Processing create request");
        self.pipelines
            .create
            .run(&Request::new(None, &data), self.store.as_ref())?;

        let draft = T::parse_draft(&data)?;
        let item = T::from_create((self.next_id_fn)(), draft);
        self.store.insert(item.clone());

        info!(id = %item.id(), "Created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    fn handle_get(&self, id: String) -> Result<T, ApiError> {
        debug!("Processing get request");
        let data = Payload::new();
        self.pipelines
            .read
            .run(&Request::new(Some(&id), &data), self.store.as_ref())?
            .into_resolved()
    }

    #[instrument(skip(self, data))]
    fn handle_update(&mut self, id: String, data: Payload) -> Result<T, ApiError> {
        debug!("Processing update request");
        let mut item = self
            .pipelines
            .update
            .run(&Request::new(Some(&id), &data), self.store.as_ref())?
            .into_resolved()?;

        item.on_update(T::parse_draft(&data)?);
        if !self.store.replace(item.clone()) {
            return Err(ApiError::Internal(format!("{} {id} vanished during update", T::KIND)));
        }

        info!("Updated successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    fn handle_delete(&mut self, id: String) -> Result<(), ApiError> {
        debug!("Processing delete request");
        let Some(pipeline) = &self.pipelines.delete else {
            return Err(ApiError::MethodNotAllowed(format!("{} cannot be deleted", T::KIND)));
        };
        let data = Payload::new();
        let item = pipeline
            .run(&Request::new(Some(&id), &data), self.store.as_ref())?
            .into_resolved()?;

        self.store.remove(item.id());
        info!("Deleted successfully");
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn create(&self, data: Payload) -> Result<T, ApiError> {
        self.request(|respond_to| ResourceRequest::Create { data, respond_to })
            .await
    }

    pub async fn get(&self, id: String) -> Result<T, ApiError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: String, data: Payload) -> Result<T, ApiError> {
        self.request(|respond_to| ResourceRequest::Update { id, data, respond_to })
            .await
    }

    pub async fn delete(&self, id: String) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
