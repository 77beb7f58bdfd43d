use std::collections::VecDeque;
use std::fmt;

use lumber_types::{EditorMode, Enumeration, Length, PropertyValue};
use serde::{Deserialize, Serialize};
use shape_kernel::{KernelBundle, KernelSolidHandle};
use uuid::Uuid;

use crate::error::PropertyError;
use crate::property::PropertyBag;
use crate::proxy::{FeatureBehavior, ViewBehavior};

/// Display modes every view representation supports.
pub const BUILTIN_DISPLAY_MODES: [&str; 4] = ["Flat Lines", "Shaded", "Wireframe", "Points"];

/// Stable identifier of a document object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The part of a document object that delegates may read and write.
///
/// Every successful property write queues a change notification which the
/// host later delivers to the delegates.
#[derive(Debug)]
pub struct ObjectData {
    id: ObjectId,
    name: String,
    kind: String,
    properties: PropertyBag,
    shape: Option<KernelSolidHandle>,
    touched: VecDeque<String>,
    needs_recompute: bool,
    invalid: bool,
    journal: Option<Vec<(String, PropertyValue)>>,
}

impl ObjectData {
    pub(crate) fn new(id: ObjectId, kind: &str, name: &str) -> Self {
        let mut properties = PropertyBag::new();
        // A fresh bag cannot already contain Label.
        let _ = properties.add("Label", "Base", "User name of the object", PropertyValue::string(name));
        Self {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            properties,
            shape: None,
            touched: VecDeque::new(),
            needs_recompute: true,
            invalid: false,
            journal: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Unique internal name within the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host object kind, e.g. "Part::FeaturePython".
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn add_property(
        &mut self,
        name: &str,
        group: &str,
        doc: &str,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        self.properties.add(name, group, doc, value)
    }

    pub fn get(&self, name: &str) -> Result<&PropertyValue, PropertyError> {
        self.properties.value(name)
    }

    /// Read a length property.
    pub fn length(&self, name: &str) -> Result<Length, PropertyError> {
        let value = self.get(name)?;
        value.as_length().ok_or_else(|| PropertyError::TypeMismatch {
            name: name.to_string(),
            expected: "Length",
            actual: value.type_name(),
        })
    }

    /// Read a string property or the selected entry of an enumeration.
    pub fn text(&self, name: &str) -> Result<&str, PropertyError> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| PropertyError::TypeMismatch {
            name: name.to_string(),
            expected: "String",
            actual: value.type_name(),
        })
    }

    /// Assign a property and queue a change notification if it changed.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), PropertyError> {
        let before = self.properties.value(name)?.clone();
        if self.properties.assign(name, value)? {
            if let Some(journal) = self.journal.as_mut() {
                if !journal.iter().any(|(n, _)| n == name) {
                    journal.push((name.to_string(), before));
                }
            }
            self.touch(name);
        }
        Ok(())
    }

    /// Convenience for `set(name, PropertyValue::string(text))`.
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<(), PropertyError> {
        self.set(name, PropertyValue::string(text))
    }

    /// Register an enumeration property with `selected` chosen.
    pub fn add_enumeration(
        &mut self,
        name: &str,
        group: &str,
        doc: &str,
        choices: Vec<String>,
        selected: &str,
    ) -> Result<(), PropertyError> {
        let mut e = Enumeration::new(choices);
        if !e.select(selected) {
            return Err(PropertyError::NotInEnumeration {
                name: name.to_string(),
                value: selected.to_string(),
            });
        }
        self.add_property(name, group, doc, PropertyValue::Enumeration { value: e })
    }

    pub fn set_editor_mode(&mut self, name: &str, mode: EditorMode) -> Result<(), PropertyError> {
        self.properties.set_editor_mode(name, mode)
    }

    pub fn label(&self) -> &str {
        self.text("Label").unwrap_or(self.name.as_str())
    }

    pub fn set_label(&mut self, label: &str) -> Result<(), PropertyError> {
        self.set_text("Label", label)
    }

    pub fn shape(&self) -> Option<&KernelSolidHandle> {
        self.shape.as_ref()
    }

    /// Replace the object's shape, releasing the previous solid.
    pub fn set_shape(&mut self, shape: KernelSolidHandle, kernel: &mut dyn KernelBundle) {
        if let Some(old) = self.shape.replace(shape) {
            kernel.release(&old);
        }
        self.queue("Shape");
    }

    /// Whether the last recompute of this object failed.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn needs_recompute(&self) -> bool {
        self.needs_recompute
    }

    fn touch(&mut self, name: &str) {
        self.needs_recompute = true;
        self.queue(name);
    }

    fn queue(&mut self, name: &str) {
        if !self.touched.iter().any(|n| n == name) {
            self.touched.push_back(name.to_string());
        }
    }

    pub(crate) fn pop_touched(&mut self) -> Option<String> {
        self.touched.pop_front()
    }

    pub(crate) fn clear_touched(&mut self) {
        self.touched.clear();
    }

    pub(crate) fn mark_recomputed(&mut self, ok: bool) {
        self.invalid = !ok;
        if ok {
            self.needs_recompute = false;
        }
    }

    pub(crate) fn begin_journal(&mut self) {
        self.journal = Some(Vec::new());
    }

    pub(crate) fn end_journal(&mut self) -> Vec<(String, PropertyValue)> {
        self.journal.take().unwrap_or_default()
    }

    /// Write journaled values back without notifications.
    pub(crate) fn restore_values(&mut self, values: &[(String, PropertyValue)]) {
        for (name, value) in values {
            self.properties.restore(name, value.clone());
        }
        self.needs_recompute = true;
    }

    /// Current values of the named properties.
    pub(crate) fn snapshot(&self, names: impl Iterator<Item = String>) -> Vec<(String, PropertyValue)> {
        names
            .filter_map(|n| self.properties.value(&n).ok().cloned().map(|v| (n, v)))
            .collect()
    }
}

/// The part of a view representation that view delegates may read and write.
#[derive(Debug)]
pub struct ViewData {
    properties: PropertyBag,
}

impl Default for ViewData {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewData {
    /// View properties holding the built-in display modes and visibility.
    pub fn new() -> Self {
        let mut properties = PropertyBag::new();
        let modes = BUILTIN_DISPLAY_MODES.iter().map(|m| m.to_string()).collect();
        let _ = properties.add(
            "DisplayMode",
            "Display Options",
            "Set the display mode",
            PropertyValue::Enumeration {
                value: Enumeration::new(modes),
            },
        );
        let _ = properties.add(
            "Visibility",
            "Display Options",
            "Show the object in the 3D view",
            PropertyValue::Bool { value: true },
        );
        Self { properties }
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn display_mode(&self) -> Option<&str> {
        self.properties.value("DisplayMode").ok().and_then(|v| v.as_str())
    }

    pub fn is_visible(&self) -> bool {
        self.properties
            .value("Visibility")
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    pub(crate) fn add_display_modes(&mut self, modes: &[String]) {
        if modes.is_empty() {
            return;
        }
        let Ok(PropertyValue::Enumeration { value }) = self.properties.value("DisplayMode") else {
            return;
        };
        let mut choices = value.choices().to_vec();
        let selected = value.selected().map(str::to_string);
        for m in modes {
            if !choices.contains(m) {
                choices.push(m.clone());
            }
        }
        let mut e = Enumeration::new(choices);
        if let Some(s) = selected {
            e.select(&s);
        }
        self.properties
            .restore("DisplayMode", PropertyValue::Enumeration { value: e });
    }

    pub(crate) fn assign(&mut self, name: &str, value: PropertyValue) -> Result<bool, PropertyError> {
        self.properties.assign(name, value)
    }
}

/// The host's view representation of an object.
pub struct ViewObject {
    pub data: ViewData,
    pub(crate) proxy: Option<Box<dyn ViewBehavior>>,
}

impl ViewObject {
    pub(crate) fn new() -> Self {
        Self {
            data: ViewData::new(),
            proxy: None,
        }
    }

    pub fn proxy(&self) -> Option<&dyn ViewBehavior> {
        self.proxy.as_deref()
    }

    /// Tree-view icon supplied by the view delegate, if any.
    pub fn icon(&self) -> Option<&str> {
        self.proxy.as_ref().map(|p| p.icon())
    }
}

/// A host-owned document object: generic data plus attached delegates.
pub struct DocumentObject {
    pub data: ObjectData,
    pub(crate) proxy: Option<Box<dyn FeatureBehavior>>,
    pub view: ViewObject,
}

impl DocumentObject {
    pub(crate) fn new(id: ObjectId, kind: &str, name: &str) -> Self {
        Self {
            data: ObjectData::new(id, kind, name),
            proxy: None,
            view: ViewObject::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.data.id()
    }

    pub fn label(&self) -> &str {
        self.data.label()
    }

    pub fn proxy(&self) -> Option<&dyn FeatureBehavior> {
        self.proxy.as_deref()
    }
}
