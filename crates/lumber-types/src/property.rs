use serde::{Deserialize, Serialize};

use crate::length::Length;

/// A typed property value held by a document object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyValue {
    Length { value: Length },
    Enumeration { value: Enumeration },
    String { value: String },
    Bool { value: bool },
}

impl PropertyValue {
    pub fn length(value: Length) -> Self {
        PropertyValue::Length { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        PropertyValue::String {
            value: value.into(),
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Length { .. } => "Length",
            PropertyValue::Enumeration { .. } => "Enumeration",
            PropertyValue::String { .. } => "String",
            PropertyValue::Bool { .. } => "Bool",
        }
    }

    pub fn as_length(&self) -> Option<Length> {
        match self {
            PropertyValue::Length { value } => Some(*value),
            _ => None,
        }
    }

    /// The text of a string property or the selected entry of an enumeration.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String { value } => Some(value),
            PropertyValue::Enumeration { value } => value.selected(),
            PropertyValue::Length { .. } | PropertyValue::Bool { .. } => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool { value } => Some(*value),
            _ => None,
        }
    }
}

/// A closed list of string choices with one selected entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    choices: Vec<String>,
    selected: Option<usize>,
}

impl Enumeration {
    /// Create an enumeration with the first choice selected.
    pub fn new(choices: Vec<String>) -> Self {
        let selected = if choices.is_empty() { None } else { Some(0) };
        Self { choices, selected }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    /// Select a choice by its text. Returns false and leaves the selection
    /// unchanged if `choice` is not listed.
    pub fn select(&mut self, choice: &str) -> bool {
        match self.choices.iter().position(|c| c == choice) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }
}

/// How a property is presented in the property editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    Editable,
    ReadOnly,
    Hidden,
}
