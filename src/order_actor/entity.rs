use serde_json::Value;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderDraft, OrderLine, OrderStatus};
use crate::error::ApiError;
use crate::pipeline::validate::{
    is_truthy, positive_integer, quantity_message, required_text, DISHES_MESSAGE, STATUS_MESSAGE,
};
use crate::pipeline::{Payload, Pipelines};

impl Entity for Order {
    const KIND: &'static str = "Order";
    type Draft = OrderDraft;

    fn id(&self) -> &str {
        &self.id
    }

    /// Extracts the order fields.
    ///
    /// # Notes
    /// `status` is optional here: create requests may leave it out and get
    /// `pending`. A status that is present must still be one of the known
    /// values.
    fn parse_draft(data: &Payload) -> Result<OrderDraft, ApiError> {
        let status = match data.get("status").filter(|value| is_truthy(value)) {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .and_then(OrderStatus::parse)
                    .ok_or_else(|| ApiError::ValidationError(STATUS_MESSAGE.to_string()))?,
            ),
        };

        let dishes = data
            .get("dishes")
            .and_then(Value::as_array)
            .filter(|lines| !lines.is_empty())
            .ok_or_else(|| ApiError::ValidationError(DISHES_MESSAGE.to_string()))?
            .iter()
            .enumerate()
            .map(|(index, line)| parse_line(index, line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderDraft {
            deliver_to: required_text(Self::KIND, data, "deliverTo")?,
            mobile_number: required_text(Self::KIND, data, "mobileNumber")?,
            status,
            dishes,
        })
    }

    fn from_create(id: String, draft: OrderDraft) -> Self {
        Self {
            id,
            deliver_to: draft.deliver_to,
            mobile_number: draft.mobile_number,
            status: draft.status.unwrap_or(OrderStatus::Pending),
            dishes: draft.dishes,
        }
    }

    fn on_update(&mut self, draft: OrderDraft) {
        self.deliver_to = draft.deliver_to;
        self.mobile_number = draft.mobile_number;
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.dishes = draft.dishes;
    }

    fn pipelines() -> Pipelines<Self> {
        super::pipelines::order_pipelines()
    }
}

fn parse_line(index: usize, line: &Value) -> Result<OrderLine, ApiError> {
    let invalid = || ApiError::ValidationError(quantity_message(index));
    let fields = line.as_object().ok_or_else(invalid)?;
    let quantity = fields
        .get("quantity")
        .and_then(positive_integer)
        .ok_or_else(invalid)?;
    let dish_id = fields.get("dishId").and_then(Value::as_str).map(str::to_string);
    let extra = fields
        .iter()
        .filter(|(key, _)| match key.as_str() {
            "quantity" => false,
            "dishId" => dish_id.is_none(),
            _ => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(OrderLine {
        dish_id,
        quantity,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn create_defaults_status_to_pending() {
        let draft = Order::parse_draft(&payload(json!({
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "dishes": [{"dishId": "d1", "quantity": 2}]
        })))
        .unwrap();

        let order = Order::from_create("o1".into(), draft);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.dishes, vec![OrderLine::new("d1", 2)]);
    }

    #[test]
    fn unknown_status_is_rejected_on_create() {
        let err = Order::parse_draft(&payload(json!({
            "deliverTo": "x",
            "mobileNumber": "y",
            "status": "lost",
            "dishes": [{"quantity": 1}]
        })))
        .unwrap_err();
        assert_eq!(err, ApiError::ValidationError(STATUS_MESSAGE.into()));
    }

    #[test]
    fn extra_line_fields_are_preserved() {
        let draft = Order::parse_draft(&payload(json!({
            "deliverTo": "x",
            "mobileNumber": "y",
            "status": "delivered",
            "dishes": [{"id": "d9", "name": "Dolcelatte", "price": 19, "quantity": 3}]
        })))
        .unwrap();

        let line = &draft.dishes[0];
        assert_eq!(line.dish_id, None);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.extra.get("name"), Some(&json!("Dolcelatte")));
        assert_eq!(line.extra.get("id"), Some(&json!("d9")));
        assert_eq!(draft.status, Some(OrderStatus::Delivered));
    }

    #[test]
    fn non_string_dish_id_is_echoed_as_sent() {
        let draft = Order::parse_draft(&payload(json!({
            "deliverTo": "x",
            "mobileNumber": "y",
            "dishes": [{"dishId": 42, "quantity": 1}, {"dishId": null, "quantity": 2}]
        })))
        .unwrap();

        assert_eq!(draft.dishes[0].dish_id, None);
        let order = Order::from_create("o1".into(), draft);
        assert_eq!(
            serde_json::to_value(&order).unwrap()["dishes"],
            json!([{"dishId": 42, "quantity": 1}, {"dishId": null, "quantity": 2}])
        );
    }

    #[test]
    fn update_replaces_fields_but_not_id() {
        let mut order = Order::new("o1", "a", "b", OrderStatus::Pending, vec![OrderLine::new("d1", 1)]);
        order.on_update(OrderDraft {
            deliver_to: "c".into(),
            mobile_number: "d".into(),
            status: Some(OrderStatus::Preparing),
            dishes: vec![OrderLine::new("d2", 4)],
        });
        assert_eq!(
            order,
            Order::new("o1", "c", "d", OrderStatus::Preparing, vec![OrderLine::new("d2", 4)])
        );
    }
}
