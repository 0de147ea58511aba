use crate::domain::{Order, OrderStatus};
use crate::error::ApiError;
use crate::pipeline::resolve::resolve_by_id;
use crate::pipeline::validate::{
    dishes_non_empty_array, each_dish_has_quantity, each_quantity_is_integer, field_present,
    id_matches_route, status_in_enum,
};
use crate::pipeline::{Context, Pipeline, Pipelines, Stage};

pub const NOT_PENDING_MESSAGE: &str = "An order cannot be deleted unless it is pending";

/// Gates deletion on the stored status, not on anything in the payload.
pub fn status_is_pending() -> Stage<Order> {
    Stage::predicate("status_is_pending", |_request, context: &Context<Order>| {
        if context.resolved()?.status == OrderStatus::Pending {
            Ok(())
        } else {
            Err(ApiError::ValidationError(NOT_PENDING_MESSAGE.to_string()))
        }
    })
}

fn with_order_fields(pipeline: Pipeline<Order>) -> Pipeline<Order> {
    pipeline
        .stage(field_present("deliverTo"))
        .stage(field_present("mobileNumber"))
        .stage(field_present("dishes"))
        .stage(dishes_non_empty_array())
        .stage(each_dish_has_quantity())
        .stage(each_quantity_is_integer())
}

pub fn order_pipelines() -> Pipelines<Order> {
    Pipelines {
        create: with_order_fields(Pipeline::new()),
        read: Pipeline::new().stage(resolve_by_id()),
        update: with_order_fields(Pipeline::new().stage(resolve_by_id()))
            .stage(id_matches_route())
            .stage(status_in_enum()),
        delete: Some(
            Pipeline::new()
                .stage(resolve_by_id())
                .stage(status_is_pending()),
        ),
    }
}
