use serde::{Deserialize, Serialize};

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

/// Validated fields of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

#[cfg(test)]
impl Dish {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            image_url: image_url.into(),
        }
    }
}
