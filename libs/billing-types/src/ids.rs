use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts string, number or null ids; the platform API uses integer keys,
/// Stripe uses prefixed strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A reference that is either a bare id or an expanded object. Bare ids
/// arrive as strings or integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object(ExpandedRef),
}

impl<'de> Deserialize<'de> for Expandable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(Expandable::Id(id)),
            Value::Number(n) => Ok(Expandable::Id(n.to_string())),
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(Expandable::Object)
                .map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected an id or an object, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandedRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Expandable {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(object) => &object.id,
        }
    }

    /// Display name carried by an expanded object, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => object.name.as_deref().or(object.email.as_deref()),
        }
    }
}
