use crate::domain::Dish;
use crate::pipeline::resolve::resolve_by_id;
use crate::pipeline::validate::{field_present, id_matches_route, price_valid};
use crate::pipeline::{Pipeline, Pipelines};

const REQUIRED_FIELDS: [&str; 4] = ["name", "description", "price", "image_url"];

fn with_required_fields(mut pipeline: Pipeline<Dish>) -> Pipeline<Dish> {
    for field in REQUIRED_FIELDS {
        pipeline = pipeline.stage(field_present(field));
    }
    pipeline.stage(price_valid())
}

/// Dishes can be listed, created, read and updated, never deleted.
pub fn dish_pipelines() -> Pipelines<Dish> {
    Pipelines {
        create: with_required_fields(Pipeline::new()),
        read: Pipeline::new().stage(resolve_by_id()),
        update: with_required_fields(Pipeline::new().stage(resolve_by_id()))
            .stage(id_matches_route()),
        delete: None,
    }
}
