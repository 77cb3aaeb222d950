//! Provider metadata handed to the host at startup.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::resource::{CiphertextResource, RESOURCE_TYPE};

/// Schema of a single resource attribute.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<&'static str>,
}

impl Attribute {
    fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: "string",
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            default: None,
            one_of: Vec::new(),
        }
    }

    pub fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            required: true,
            ..Self::string(name, description)
        }
    }

    pub fn optional(
        name: &'static str,
        description: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            optional: true,
            default: Some(default),
            ..Self::string(name, description)
        }
    }

    pub fn computed(name: &'static str, description: &'static str) -> Self {
        Self {
            computed: true,
            ..Self::string(name, description)
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Restricts the attribute to a case-insensitive set of values.
    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.one_of = values.to_vec();
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub description: String,
    pub attributes: Vec<Attribute>,
}

/// Registry of the resource types this provider serves.
#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub version: String,
    pub resources: BTreeMap<&'static str, ResourceSchema>,
    pub data_sources: BTreeMap<&'static str, ResourceSchema>,
}

impl Provider {
    pub fn new(version: impl Into<String>) -> Self {
        let mut resources = BTreeMap::new();
        resources.insert(RESOURCE_TYPE, CiphertextResource::schema());

        Self {
            version: version.into(),
            resources,
            data_sources: BTreeMap::new(),
        }
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceSchema> {
        self.resources.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_ciphertext_resource() {
        let provider = Provider::new("dev");
        assert_eq!(provider.version, "dev");
        assert!(provider.resource("rsa_ciphertext").is_some());
        assert!(provider.resource("rsa_plaintext").is_none());
        assert!(provider.data_sources.is_empty());
    }

    #[test]
    fn optional_attributes_serialize_defaults() {
        let provider = Provider::new("dev");
        let json = serde_json::to_value(&provider).unwrap();
        let padding = &json["resources"]["rsa_ciphertext"]["attributes"][2];

        assert_eq!(padding["name"], "padding");
        assert_eq!(padding["default"], "PKCS1.5");
        assert_eq!(padding["type"], "string");
        assert_eq!(padding["one_of"][1], "OAEP");
    }
}
