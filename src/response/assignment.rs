use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::response::Render;

/// `page: "assignment1"`. `special` and `extraSpecial` hold arbitrary JSON
/// values and render with their type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAssignment {
    pub page: String,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub percentages: BTreeMap<String, f64>,
    #[serde(default)]
    pub special: Vec<Value>,
    #[serde(default)]
    pub extra_special: Vec<Value>,
}

impl Render for GenericAssignment {
    fn render(&self) -> String {
        let mut out = format!(
            "Parsed JSON:\nPage: {}\nWords: {}\nPercentages:\n",
            self.page,
            self.words.join(", ")
        );
        for (key, value) in &self.percentages {
            out.push_str(&format!("Number is {}, it's percentage is {}\n", key, value));
        }
        out.push_str("Specials:\n");
        push_typed_values(&mut out, &self.special);
        out.push_str("ExtraSpecials:\n");
        push_typed_values(&mut out, &self.extra_special);
        out
    }
}

fn push_typed_values(out: &mut String, values: &[Value]) {
    for value in values {
        out.push_str(&format!("{} with type of {}\n", display_value(value), type_tag(value)));
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Textual type of a JSON value
pub fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
