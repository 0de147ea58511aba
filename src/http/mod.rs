//! HTTP surface: translates REST calls into client requests.
//!
//! Bodies use a `{data: ...}` envelope in both directions. Errors are
//! rendered by [`ApiError`]'s `IntoResponse` as `{message}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::clients::{DishClient, OrderClient};
use crate::domain::{Dish, Order};
use crate::error::ApiError;
use crate::pipeline::Payload;

#[derive(Clone)]
pub struct AppState {
    pub dishes: DishClient,
    pub orders: OrderClient,
}

#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

type ApiResult<T> = Result<Json<DataBody<T>>, ApiError>;
type Created<T> = Result<(StatusCode, Json<DataBody<T>>), ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/dishes",
            get(list_dishes).post(create_dish).fallback(method_not_allowed),
        )
        .route(
            "/dishes/:dish_id",
            get(read_dish).put(update_dish).fallback(method_not_allowed),
        )
        .route(
            "/orders",
            get(list_orders).post(create_order).fallback(method_not_allowed),
        )
        .route(
            "/orders/:order_id",
            get(read_order)
                .put(update_order)
                .delete(delete_order)
                .fallback(method_not_allowed),
        )
        .fallback(path_not_found)
        .with_state(state)
}

/// Pulls the `data` object out of a request body. A missing or non-object
/// `data` reads as empty, so the pipeline reports the first missing field.
fn into_payload(body: Result<Json<Value>, JsonRejection>) -> Result<Payload, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::ValidationError(rejection.body_text()))?;
    Ok(match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Object(data)) => data,
            _ => Payload::new(),
        },
        _ => Payload::new(),
    })
}

fn data<T>(value: T) -> Json<DataBody<T>> {
    Json(DataBody { data: value })
}

async fn method_not_allowed(uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method not allowed: {}", uri.path()))
}

async fn path_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Path not found: {}", uri.path()))
}

// =============================================================================
// DISHES
// =============================================================================

async fn list_dishes(State(state): State<AppState>) -> ApiResult<Vec<Dish>> {
    Ok(data(state.dishes.list_dishes().await?))
}

#[instrument(skip_all)]
async fn create_dish(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Created<Dish> {
    let dish = state.dishes.create_dish(into_payload(body)?).await?;
    Ok((StatusCode::CREATED, data(dish)))
}

async fn read_dish(State(state): State<AppState>, Path(dish_id): Path<String>) -> ApiResult<Dish> {
    Ok(data(state.dishes.get_dish(dish_id).await?))
}

#[instrument(skip(state, body))]
async fn update_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Dish> {
    Ok(data(state.dishes.update_dish(dish_id, into_payload(body)?).await?))
}

// =============================================================================
// ORDERS
// =============================================================================

async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    Ok(data(state.orders.list_orders().await?))
}

#[instrument(skip_all)]
async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Created<Order> {
    let order = state.orders.create_order(into_payload(body)?).await?;
    Ok((StatusCode::CREATED, data(order)))
}

async fn read_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Order> {
    Ok(data(state.orders.get_order(order_id).await?))
}

#[instrument(skip(state, body))]
async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Order> {
    Ok(data(state.orders.update_order(order_id, into_payload(body)?).await?))
}

#[instrument(skip(state))]
async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.orders.delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
