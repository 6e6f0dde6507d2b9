use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents optional field semantics in PUT/UPDATE requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly null
/// - `SetToValue` → set to provided value
///
/// Pair with `#[serde(default, skip_serializing_if = "OptionField::is_unchanged")]`
/// so an absent key stays `Unchanged` and is never echoed back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => OptionField::SetToNull,
            Some(value) => OptionField::SetToValue(value),
        })
    }
}

impl<T> Serialize for OptionField<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionField::SetToValue(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl OptionField<String> {
    /// Collapses null and blank into an empty string; `None` when untouched.
    pub fn into_cleared_string(self) -> Option<String> {
        self.into_option().map(|value| value.unwrap_or_default())
    }
}

/// Reads an optional string where `""` and `null` both mean "not set".
pub fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(default)]
    struct Probe {
        #[serde(skip_serializing_if = "OptionField::is_unchanged")]
        link: OptionField<String>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"link":null}"#).unwrap();
        let value: Probe = serde_json::from_str(r#"{"link":"x"}"#).unwrap();

        assert_eq!(absent.link, OptionField::Unchanged);
        assert_eq!(null.link, OptionField::SetToNull);
        assert_eq!(value.link, OptionField::SetToValue("x".to_string()));
    }

    #[test]
    fn unchanged_is_not_serialized() {
        let json = serde_json::to_string(&Probe::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn cleared_string_collapses_null() {
        assert_eq!(OptionField::<String>::SetToNull.into_cleared_string(), Some(String::new()));
        assert_eq!(OptionField::<String>::Unchanged.into_cleared_string(), None);
    }
}
