pub mod assistant;
pub mod conversation;
pub mod file;
pub mod message;

pub use assistant::*;
pub use conversation::*;
pub use file::*;
pub use message::*;

use serde_json::{Map, Value};

/// Flatten serde_valid errors into `{ "field": ["message", ..] }`.
pub fn field_errors(errors: &serde_valid::validation::Errors) -> Map<String, Value> {
    let raw: Value = serde_json::from_str(&errors.to_string())
        .unwrap_or_else(|_| Value::String(errors.to_string()));

    let mut fields = Map::new();
    match raw.get("properties").and_then(Value::as_object) {
        Some(properties) => {
            for (field, detail) in properties {
                let messages = detail.get("errors").cloned().unwrap_or_else(|| detail.clone());
                fields.insert(field.clone(), messages);
            }
        }
        None => {
            fields.insert("_form".to_string(), raw);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_valid::Validate;

    #[derive(serde::Deserialize, Validate)]
    struct Named {
        #[validate(min_length = 3)]
        name: String,
    }

    #[test]
    fn field_errors_are_keyed_by_field() {
        let named = Named { name: "a".to_string() };
        let errors = named.validate().unwrap_err();
        let fields = field_errors(&errors);
        assert!(fields.contains_key("name"));
    }
}
