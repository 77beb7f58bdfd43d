use std::mem::discriminant;

use lumber_types::{EditorMode, Length, PropertyValue};

use crate::error::PropertyError;

/// A named, typed property registered on an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    /// Property editor group, e.g. "Base" or "Lumber".
    pub group: String,
    /// Tooltip text.
    pub doc: String,
    pub value: PropertyValue,
    pub editor_mode: EditorMode,
}

/// Ordered property storage. Registration order is display order.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    props: Vec<Property>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new property with its initial value.
    pub fn add(
        &mut self,
        name: &str,
        group: &str,
        doc: &str,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        if self.contains(name) {
            return Err(PropertyError::AlreadyExists {
                name: name.to_string(),
            });
        }
        self.props.push(Property {
            name: name.to_string(),
            group: group.to_string(),
            doc: doc.to_string(),
            value,
            editor_mode: EditorMode::Editable,
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.props.iter().any(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Property, PropertyError> {
        self.props
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| PropertyError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn value(&self, name: &str) -> Result<&PropertyValue, PropertyError> {
        self.get(name)
            .map(|p| &p.value)
            .ok_or_else(|| PropertyError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    /// Assign a value using the host's coercion rules:
    /// a string selects an enumeration entry or parses as a length quantity;
    /// otherwise the value must have the property's type. An enumeration
    /// keeps the choices it was registered with; only its selection moves.
    ///
    /// Returns whether the stored value changed.
    pub fn assign(&mut self, name: &str, new: PropertyValue) -> Result<bool, PropertyError> {
        let prop = self.get_mut(name)?;

        match (&mut prop.value, new) {
            (PropertyValue::Enumeration { value: current }, PropertyValue::String { value }) => {
                if current.selected() == Some(value.as_str()) {
                    return Ok(false);
                }
                if current.select(&value) {
                    Ok(true)
                } else {
                    Err(PropertyError::NotInEnumeration {
                        name: name.to_string(),
                        value,
                    })
                }
            }
            (PropertyValue::Length { value: current }, PropertyValue::String { value }) => {
                let parsed: Length =
                    value
                        .parse()
                        .map_err(|source| PropertyError::InvalidQuantity {
                            name: name.to_string(),
                            source,
                        })?;
                let changed = *current != parsed;
                *current = parsed;
                Ok(changed)
            }
            (PropertyValue::Enumeration { value: current }, PropertyValue::Enumeration { value }) => {
                if current.choices() != value.choices() {
                    return Err(PropertyError::ChoicesFixed {
                        name: name.to_string(),
                    });
                }
                let changed = *current != value;
                *current = value;
                Ok(changed)
            }
            (current, new) if discriminant(current) == discriminant(&new) => {
                let changed = *current != new;
                *current = new;
                Ok(changed)
            }
            (current, new) => Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: current.type_name(),
                actual: new.type_name(),
            }),
        }
    }

    /// Overwrite a value without coercion. Used when restoring journals.
    pub(crate) fn restore(&mut self, name: &str, value: PropertyValue) {
        if let Ok(prop) = self.get_mut(name) {
            prop.value = value;
        }
    }

    pub fn set_editor_mode(&mut self, name: &str, mode: EditorMode) -> Result<(), PropertyError> {
        self.get_mut(name)?.editor_mode = mode;
        Ok(())
    }

    pub fn editor_mode(&self, name: &str) -> Option<EditorMode> {
        self.get(name).map(|p| p.editor_mode)
    }
}
