use crate::actor_framework::Entity;
use crate::domain::{Dish, DishDraft};
use crate::error::ApiError;
use crate::pipeline::validate::{positive_integer, required_text, PRICE_MESSAGE};
use crate::pipeline::{Payload, Pipelines};

impl Entity for Dish {
    const KIND: &'static str = "Dish";
    type Draft = DishDraft;

    fn id(&self) -> &str {
        &self.id
    }

    /// Extracts the four dish fields. Any submitted `id` is ignored here; the
    /// update pipeline has already compared it against the route.
    fn parse_draft(data: &Payload) -> Result<DishDraft, ApiError> {
        Ok(DishDraft {
            name: required_text(Self::KIND, data, "name")?,
            description: required_text(Self::KIND, data, "description")?,
            price: data
                .get("price")
                .and_then(positive_integer)
                .ok_or_else(|| ApiError::ValidationError(PRICE_MESSAGE.to_string()))?,
            image_url: required_text(Self::KIND, data, "image_url")?,
        })
    }

    fn from_create(id: String, draft: DishDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
        }
    }

    fn on_update(&mut self, draft: DishDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_url = draft.image_url;
    }

    fn pipelines() -> Pipelines<Self> {
        super::pipelines::dish_pipelines()
    }
}
