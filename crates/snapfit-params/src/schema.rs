//! Parameter schemas.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::set::{ParamValue, ParameterSet};

/// The kinds of value a schema key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Any finite or non-finite number.
    Number,
    /// One of a fixed set of strings.
    Choice(&'static [&'static str]),
}

impl ValueKind {
    /// Whether `value` is of this kind.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ValueKind::Number, ParamValue::Number(_)) => true,
            (ValueKind::Choice(options), ParamValue::Text(s)) => options.contains(&s.as_str()),
            _ => false,
        }
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Number => "number".into(),
            ValueKind::Choice(options) => format!("one of {}", options.join(", ")),
        }
    }
}

/// Which part of a feature a parameter belongs to.
///
/// Library profiles store the geometry group, gap profiles the gap group;
/// placement values are supplied per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    /// Shape-defining dimensions.
    Geometry,
    /// Clearances for the mating cut.
    Gap,
    /// Qualitative placement selectors.
    Placement,
}

/// One declared key of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Parameter name.
    pub key: &'static str,
    /// Allowed value kind.
    pub kind: ValueKind,
    /// Group the parameter belongs to.
    pub group: FieldGroup,
}

impl FieldSpec {
    /// A numeric field.
    pub const fn number(key: &'static str, group: FieldGroup) -> Self {
        Self {
            key,
            kind: ValueKind::Number,
            group,
        }
    }

    /// A categorical placement field.
    pub const fn choice(key: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            kind: ValueKind::Choice(options),
            group: FieldGroup::Placement,
        }
    }
}

/// The declared key set of a feature family, with allowed kinds per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSchema {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl ParameterSchema {
    /// Declare a schema.
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Schema name (the feature family).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Look up a field.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Keys of one group in declaration order.
    pub fn keys_in(&self, group: FieldGroup) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(move |f| f.group == group)
            .map(|f| f.key)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check that `params` has exactly this schema's keys with allowed kinds.
    pub fn validate(&self, params: &ParameterSet) -> Result<()> {
        check_fields(self.fields.iter(), params)
    }

    /// Like [`ParameterSchema::validate`], restricted to the keys of `group`.
    pub fn validate_group(&self, group: FieldGroup, params: &ParameterSet) -> Result<()> {
        check_fields(self.fields.iter().filter(|f| f.group == group), params)
    }
}

fn check_fields<'a>(
    fields: impl Iterator<Item = &'a FieldSpec> + Clone,
    params: &ParameterSet,
) -> Result<()> {
    let mut missing: Vec<String> = fields
        .clone()
        .filter(|f| !params.contains_key(f.key))
        .map(|f| f.key.to_string())
        .collect();
    let extra: Vec<String> = params
        .keys()
        .filter(|k| !fields.clone().any(|f| f.key == *k))
        .map(str::to_string)
        .collect();

    if !missing.is_empty() || !extra.is_empty() {
        missing.sort();
        return Err(ValidationError::SchemaMismatch { missing, extra });
    }

    for field in fields {
        if let Some(value) = params.get(field.key) {
            if !field.kind.accepts(value) {
                return Err(ValidationError::TypeMismatch {
                    key: field.key.to_string(),
                    expected: field.kind.describe(),
                    found: format!("{} {value}", value.kind_name()),
                });
            }
        }
    }
    Ok(())
}

/// Validate `parameters` against `schema`.
pub fn validate(parameters: &ParameterSet, schema: &ParameterSchema) -> Result<()> {
    schema.validate(parameters)
}
