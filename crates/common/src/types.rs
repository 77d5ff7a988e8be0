use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An activation strategy definition as seen through the read-side projection.
///
/// Strategies are identified by `name`. Beyond the name and an optional
/// description, the payload is opaque to the gateway: clients may attach
/// arbitrary descriptive fields (e.g. a parameters template), which are
/// carried through unchanged via the flattened `attributes` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Unique strategy name. Allowed characters: `[0-9a-zA-Z.-]`.
    ///
    /// Defaults to empty when absent from the payload so that structural
    /// validation, not deserialization, reports the missing field.
    #[serde(default)]
    pub name: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form descriptive fields, passed through verbatim.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Strategy {
    /// Creates a strategy with the given name and no other fields.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a free-form attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_sets_only_the_name() {
        let strategy = Strategy::named("default");
        assert_eq!(strategy.name, "default");
        assert!(strategy.description.is_none());
        assert!(strategy.attributes.is_empty());
    }

    #[test]
    fn free_form_attributes_survive_serialization() {
        let strategy = Strategy::named("gradualRollout")
            .with_description("Gradual rollout by percentage")
            .with_attribute(
                "parametersTemplate",
                serde_json::json!({"percentage": "string"}),
            );

        let json = serde_json::to_value(&strategy).unwrap();
        assert_eq!(json["name"], "gradualRollout");
        assert_eq!(json["parametersTemplate"]["percentage"], "string");

        let back: Strategy = serde_json::from_value(json).unwrap();
        assert_eq!(back, strategy);
    }

    #[test]
    fn unknown_fields_are_captured_not_dropped() {
        let json = serde_json::json!({
            "name": "remoteAddress",
            "editable": false,
        });
        let strategy: Strategy = serde_json::from_value(json).unwrap();
        assert_eq!(
            strategy.attributes.get("editable"),
            Some(&serde_json::json!(false))
        );
    }
}
