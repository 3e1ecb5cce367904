//! Conversions between [`Value`] and `serde_json::Value`.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Number as JsonNumber, Value as Json};

use crate::object::Object;
use crate::value::Value;

impl Value {
    /// Builds a [`Value`] from parsed JSON.
    ///
    /// JSON objects become [`Value::Map`] — JSON carries no type names, so
    /// no [`Object`] instances are produced. Numbers become `Int` when they
    /// fit an `i64`, `Float` otherwise.
    #[must_use]
    pub fn from_json(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Json::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Self::Text(k), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Renders this value as JSON.
    ///
    /// Objects are rendered as JSON objects with a `"@type"` entry holding
    /// the type name. A cyclic re-entry into an object already on the
    /// current rendering path is emitted as the string `"<circular>"`, which
    /// keeps the conversion total on cyclic graphs.
    #[must_use]
    pub fn to_json(&self) -> Json {
        let mut on_path = HashSet::new();
        self.to_json_guarded(&mut on_path)
    }

    fn to_json_guarded(&self, on_path: &mut HashSet<usize>) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::Number((*i).into()),
            Self::Float(x) => JsonNumber::from_f64(*x).map_or(Json::Null, Json::Number),
            Self::Decimal(d) => Json::String(d.to_string()),
            Self::Text(s) => Json::String(s.clone()),
            Self::Date(d) => Json::String(d.to_string()),
            Self::DateTime(dt) => Json::String(dt.to_rfc3339()),
            Self::List(items) => {
                Json::Array(items.iter().map(|v| v.to_json_guarded(on_path)).collect())
            }
            Self::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_json_guarded(on_path)))
                    .collect(),
            ),
            Self::Object(obj) => {
                let id = Arc::as_ptr(obj) as usize;
                if !on_path.insert(id) {
                    return Json::String("<circular>".to_owned());
                }
                let mut rendered = JsonMap::new();
                rendered.insert("@type".to_owned(), Json::String(obj.type_name().to_owned()));
                for (name, value) in obj.fields() {
                    rendered.insert(name, value.to_json_guarded(on_path));
                }
                on_path.remove(&id);
                Json::Object(rendered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_round_trip_for_scalars() {
        let value = Value::from_json(json!({"a": 1, "b": [true, null], "c": "x"}));
        assert_eq!(value.to_json(), json!({"a": 1, "b": [true, null], "c": "x"}));
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(Value::from_json(json!(7)), Value::Int(7));
        assert_eq!(Value::from_json(json!(7.5)), Value::Float(7.5));
    }

    #[test]
    fn objects_render_with_type_tag() {
        let obj = Object::builder("User").field("age", 42_i64).build();
        assert_eq!(
            Value::Object(obj).to_json(),
            json!({"@type": "User", "age": 42})
        );
    }

    #[test]
    fn cyclic_objects_render_finitely() {
        let node = Object::builder("Node").build();
        node.set("next", node.clone());
        let rendered = Value::Object(node).to_json();
        assert_eq!(rendered, json!({"@type": "Node", "next": "<circular>"}));
    }
}
