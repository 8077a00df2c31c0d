//! Attribute schema declarations and configuration validation.

use std::collections::BTreeMap;
use serde_json::Value;
use thiserror::Error;

use crate::data::ResourceData;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
}

impl AttributeType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int => value.is_i64(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "integer",
        }
    }
}

/// Value validators applied before any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// String length (in characters) within `min..=max`.
    StringLenBetween { min: usize, max: usize },
}

impl Validator {
    pub fn string_len_between(min: usize, max: usize) -> Self {
        Self::StringLenBetween { min, max }
    }

    /// Check a value, returning the failure message.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::StringLenBetween { min, max } => {
                let Some(s) = value.as_str() else {
                    return Err("expected type to be string".to_string());
                };
                let len = s.chars().count();
                if len < *min || len > *max {
                    return Err(format!(
                        "expected length to be in the range ({min} - {max}), got {len}"
                    ));
                }
                Ok(())
            }
        }
    }
}

/// One attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: AttributeType,
    pub required: bool,
    pub optional: bool,
    /// The provider may fill the value in when configuration leaves it out.
    pub computed: bool,
    pub description: Option<&'static str>,
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn new(ty: AttributeType, required: bool) -> Self {
        Self {
            ty,
            required,
            optional: !required,
            computed: false,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required_string() -> Self {
        Self::new(AttributeType::String, true)
    }

    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, false)
    }

    pub fn optional_int() -> Self {
        Self::new(AttributeType::Int, false)
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// A single invalid attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub attribute: String,
    pub message: String,
}

/// All validation failures for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.attribute, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any failure concerns `attribute`.
    pub fn has_error_for(&self, attribute: &str) -> bool {
        self.0.iter().any(|e| e.attribute == attribute)
    }
}

/// Attribute schema of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (*k, v))
    }

    /// Validate resource data against the schema.
    ///
    /// Checks required attributes, value types and validators, and rejects
    /// attributes the schema does not declare.
    pub fn validate(&self, data: &ResourceData) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for (name, attribute) in &self.attributes {
            if attribute.required && !data.is_set(name) {
                errors.push(FieldError {
                    attribute: name.to_string(),
                    message: "required attribute is missing".to_string(),
                });
                continue;
            }

            let Some(value) = data.get(name).filter(|v| !v.is_null()) else {
                continue;
            };

            if !attribute.ty.matches(value) {
                errors.push(FieldError {
                    attribute: name.to_string(),
                    message: format!("expected type to be {}", attribute.ty.as_str()),
                });
                continue;
            }

            for validator in &attribute.validators {
                if let Err(message) = validator.check(value) {
                    errors.push(FieldError {
                        attribute: name.to_string(),
                        message,
                    });
                }
            }
        }

        for (name, _) in data.attributes() {
            if !self.attributes.contains_key(name) {
                errors.push(FieldError {
                    attribute: name.to_string(),
                    message: "unsupported attribute".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
