//! Validator primitives.
//!
//! Each function returns a predicate [`Stage`] that checks one concern of the
//! submitted payload. Field values are judged with JSON truthiness: `null`,
//! `false`, `0` and `""` count as missing, anything else (empty arrays and
//! objects included) counts as present.

use serde_json::Value;

use super::{Context, Payload, Request, Stage};
use crate::actor_framework::Entity;
use crate::error::ApiError;

pub const DISHES_MESSAGE: &str = "Order must include at least one dish";
pub const PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0";
pub const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

pub fn quantity_message(index: usize) -> String {
    format!("Dish {index} must have a quantity that is an integer greater than 0")
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integral JSON numbers (`5` or `5.0`) strictly above zero.
pub fn positive_integer(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return (u > 0).then_some(u);
    }
    if n.is_i64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f > 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn truthy_field<'a>(request: &Request<'a>, name: &str) -> Option<&'a Value> {
    request.field(name).filter(|value| is_truthy(value))
}

/// Text of an id as the caller sent it. Whole floats print without `.0`.
fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if !n.is_u64() && !n.is_i64() => {
            n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
        }
        other => other.to_string(),
    }
}

/// Loose equality between a submitted id and the route id. Numbers compare by
/// value, so `7`, `7.0` and route `"7"` all agree.
fn id_equals_route(submitted: &Value, route: &str) -> bool {
    match submitted {
        Value::String(s) => s == route,
        Value::Number(n) => match (n.as_f64(), route.trim().parse::<f64>()) {
            (Some(sent), Ok(routed)) => sent == routed,
            _ => false,
        },
        other => other.to_string() == route,
    }
}

pub fn field_present<T: Entity>(field: &'static str) -> Stage<T> {
    Stage::predicate(format!("field_present({field})"), move |request, _context| {
        match truthy_field(request, field) {
            Some(_) => Ok(()),
            None => Err(ApiError::ValidationError(format!(
                "{} must include a {field}",
                T::KIND
            ))),
        }
    })
}

pub fn price_valid<T: Entity>() -> Stage<T> {
    Stage::predicate("price_valid", |request, _context| {
        match request.field("price").and_then(positive_integer) {
            Some(_) => Ok(()),
            None => Err(ApiError::ValidationError(PRICE_MESSAGE.to_string())),
        }
    })
}

/// An absent id is accepted. Only a submitted id that disagrees with the
/// resolved entity is rejected.
pub fn id_matches_route<T: Entity>() -> Stage<T> {
    Stage::predicate("id_matches_route", |request, context: &Context<T>| {
        let Some(submitted) = truthy_field(request, "id") else {
            return Ok(());
        };
        let route = context.resolved()?.id();
        if id_equals_route(submitted, route) {
            Ok(())
        } else {
            Err(ApiError::ValidationError(format!(
                "{kind} id does not match route id. {kind}: {submitted}, Route: {route}",
                kind = T::KIND,
                submitted = id_text(submitted)
            )))
        }
    })
}

pub fn dishes_non_empty_array<T: Entity>() -> Stage<T> {
    Stage::predicate("dishes_non_empty_array", |request, _context| {
        match request.field("dishes").and_then(Value::as_array) {
            Some(lines) if !lines.is_empty() => Ok(()),
            _ => Err(ApiError::ValidationError(DISHES_MESSAGE.to_string())),
        }
    })
}

fn dish_lines<'a>(request: &Request<'a>) -> &'a [Value] {
    request
        .field("dishes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn each_dish_has_quantity<T: Entity>() -> Stage<T> {
    Stage::predicate("each_dish_has_quantity", |request, _context| {
        let missing = dish_lines(request)
            .iter()
            .position(|line| !line.get("quantity").is_some_and(is_truthy));
        match missing {
            Some(index) => Err(ApiError::ValidationError(quantity_message(index))),
            None => Ok(()),
        }
    })
}

pub fn each_quantity_is_integer<T: Entity>() -> Stage<T> {
    Stage::predicate("each_quantity_is_integer", |request, _context| {
        let invalid = dish_lines(request)
            .iter()
            .position(|line| line.get("quantity").and_then(positive_integer).is_none());
        match invalid {
            Some(index) => Err(ApiError::ValidationError(quantity_message(index))),
            None => Ok(()),
        }
    })
}

pub fn status_in_enum<T: Entity>() -> Stage<T> {
    Stage::predicate("status_in_enum", |request, _context| {
        let known = request
            .field("status")
            .and_then(Value::as_str)
            .and_then(crate::domain::OrderStatus::parse)
            .is_some();
        if known {
            Ok(())
        } else {
            Err(ApiError::ValidationError(STATUS_MESSAGE.to_string()))
        }
    })
}

/// Reads a string field for building a draft. Runs after the pipeline, so a
/// missing value still reports the presence message.
pub fn required_text(kind: &str, data: &Payload, field: &str) -> Result<String, ApiError> {
    match data.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(value) if is_truthy(value) => Err(ApiError::ValidationError(format!(
            "{kind} {field} must be a string"
        ))),
        _ => Err(ApiError::ValidationError(format!(
            "{kind} must include a {field}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dish, Order};
    use crate::pipeline::{Context, Pipeline};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    fn check<T: Entity>(stage: Stage<T>, data: Value) -> Result<(), ApiError> {
        check_with(stage, data, None)
    }

    fn check_with<T: Entity>(stage: Stage<T>, data: Value, resolved: Option<T>) -> Result<(), ApiError> {
        let data = payload(data);
        let mut store = MemoryStore::<T>::new();
        let route = resolved.as_ref().map(|item| item.id().to_string());
        if let Some(item) = resolved {
            crate::store::Store::insert(&mut store, item);
        }
        let pipeline = match route {
            Some(_) => Pipeline::new()
                .stage(crate::pipeline::resolve::resolve_by_id())
                .stage(stage),
            None => Pipeline::new().stage(stage),
        };
        pipeline
            .run(&Request::new(route.as_deref(), &data), &store)
            .map(|_: Context<T>| ())
    }

    fn message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn truthiness_follows_json_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn positive_integer_accepts_whole_numbers_only() {
        assert_eq!(positive_integer(&json!(5)), Some(5));
        assert_eq!(positive_integer(&json!(5.0)), Some(5));
        assert_eq!(positive_integer(&json!(0)), None);
        assert_eq!(positive_integer(&json!(-3)), None);
        assert_eq!(positive_integer(&json!(2.5)), None);
        assert_eq!(positive_integer(&json!("5")), None);
        assert_eq!(positive_integer(&json!(null)), None);
    }

    #[test]
    fn field_present_names_the_field_and_kind() {
        assert!(check(field_present::<Dish>("name"), json!({"name": "Taco"})).is_ok());
        assert_eq!(
            message(check(field_present::<Dish>("name"), json!({}))),
            "Dish must include a name"
        );
        assert_eq!(
            message(check(field_present::<Order>("deliverTo"), json!({"deliverTo": ""}))),
            "Order must include a deliverTo"
        );
    }

    #[test]
    fn price_must_be_positive_integer() {
        for bad in [json!(-1), json!(0), json!(1.5), json!("10"), json!(null)] {
            assert_eq!(
                message(check(price_valid::<Dish>(), json!({ "price": bad }))),
                PRICE_MESSAGE
            );
        }
        for good in [json!(1), json!(42), json!(7.0)] {
            assert!(check(price_valid::<Dish>(), json!({ "price": good })).is_ok());
        }
    }

    #[test]
    fn absent_id_is_accepted_on_update() {
        let dish = Dish::new("d1", "Taco", "x", 5, "u");
        assert!(check_with(id_matches_route(), json!({}), Some(dish.clone())).is_ok());
        assert!(check_with(id_matches_route(), json!({"id": ""}), Some(dish.clone())).is_ok());
        assert!(check_with(id_matches_route(), json!({"id": null}), Some(dish)).is_ok());
    }

    #[test]
    fn mismatched_id_is_rejected() {
        let dish = Dish::new("d1", "Taco", "x", 5, "u");
        assert!(check_with(id_matches_route(), json!({"id": "d1"}), Some(dish.clone())).is_ok());
        assert_eq!(
            message(check_with(id_matches_route(), json!({"id": "mismatch"}), Some(dish))),
            "Dish id does not match route id. Dish: mismatch, Route: d1"
        );
    }

    #[test]
    fn numeric_id_compares_by_value() {
        let dish = Dish::new("7", "Taco", "x", 5, "u");
        assert!(check_with(id_matches_route(), json!({"id": 7}), Some(dish.clone())).is_ok());
        assert!(check_with(id_matches_route(), json!({"id": 7.0}), Some(dish.clone())).is_ok());
        assert_eq!(
            message(check_with(id_matches_route(), json!({"id": 8.0}), Some(dish.clone()))),
            "Dish id does not match route id. Dish: 8, Route: 7"
        );
        assert_eq!(
            message(check_with(id_matches_route(), json!({"id": 7.5}), Some(dish))),
            "Dish id does not match route id. Dish: 7.5, Route: 7"
        );
    }

    #[test]
    fn dishes_must_be_non_empty_array() {
        assert_eq!(
            message(check(dishes_non_empty_array::<Order>(), json!({"dishes": []}))),
            DISHES_MESSAGE
        );
        assert_eq!(
            message(check(dishes_non_empty_array::<Order>(), json!({"dishes": "taco"}))),
            DISHES_MESSAGE
        );
        assert!(check(dishes_non_empty_array::<Order>(), json!({"dishes": [{"quantity": 1}]})).is_ok());
    }

    #[test]
    fn quantity_checks_report_first_offending_index() {
        let missing = json!({"dishes": [{"quantity": 1}, {"quantity": 0}, {}]});
        assert_eq!(
            message(check(each_dish_has_quantity::<Order>(), missing)),
            quantity_message(1)
        );

        let fractional = json!({"dishes": [{"quantity": 2}, {"quantity": 2}, {"quantity": "2"}]});
        assert_eq!(
            message(check(each_quantity_is_integer::<Order>(), fractional)),
            quantity_message(2)
        );

        let negative = json!({"dishes": [{"quantity": -1}]});
        assert!(check(each_dish_has_quantity::<Order>(), negative.clone()).is_ok());
        assert_eq!(
            message(check(each_quantity_is_integer::<Order>(), negative)),
            quantity_message(0)
        );
    }

    #[test]
    fn status_must_be_known() {
        for status in ["pending", "preparing", "out-for-delivery", "delivered"] {
            assert!(check(status_in_enum::<Order>(), json!({ "status": status })).is_ok());
        }
        assert_eq!(
            message(check(status_in_enum::<Order>(), json!({"status": "invalid"}))),
            STATUS_MESSAGE
        );
        assert_eq!(message(check(status_in_enum::<Order>(), json!({}))), STATUS_MESSAGE);
    }

    #[test]
    fn required_text_distinguishes_missing_from_mistyped() {
        let data = payload(json!({"name": "Taco", "description": 12}));
        assert_eq!(required_text("Dish", &data, "name").unwrap(), "Taco");
        assert_eq!(
            required_text("Dish", &data, "description").unwrap_err(),
            ApiError::ValidationError("Dish description must be a string".into())
        );
        assert_eq!(
            required_text("Dish", &data, "image_url").unwrap_err(),
            ApiError::ValidationError("Dish must include a image_url".into())
        );
    }
}
