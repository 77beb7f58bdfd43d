//! Delegate traits the host calls back into.

use serde_json::Value;
use shape_kernel::KernelBundle;

use crate::error::ProxyError;
use crate::object::{ObjectData, ViewData};

/// Application logic attached to a document object as its proxy.
pub trait FeatureBehavior {
    /// Type name shown in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Called once when the proxy is attached. Registers properties and
    /// sets their defaults. Writes made here do not raise notifications.
    fn on_create(&mut self, obj: &mut ObjectData) -> Result<(), ProxyError>;

    /// Called for every property change on the object.
    fn on_changed(
        &self,
        obj: &mut ObjectData,
        property: &str,
        kernel: &mut dyn KernelBundle,
    ) -> Result<(), ProxyError>;

    /// Rebuild the object's shape from its current properties.
    fn execute(&self, obj: &mut ObjectData, kernel: &mut dyn KernelBundle) -> Result<(), ProxyError>;

    /// State to keep when the document is saved.
    fn get_state(&self) -> Option<Value> {
        None
    }

    /// Restore state produced by `get_state`.
    fn set_state(&mut self, _state: Option<Value>) {}
}

/// Display logic attached to an object's view representation.
pub trait ViewBehavior {
    /// Set up the view representation.
    fn attach(&mut self, vobj: &mut ViewData);

    /// Called when a property of the underlying object changed.
    fn update_data(&mut self, obj: &ObjectData, property: &str);

    /// Extra display modes beyond the host's built-in ones.
    fn display_modes(&self, vobj: &ViewData) -> Vec<String>;

    /// Display mode selected when the view is attached.
    fn default_display_mode(&self) -> String;

    /// Map a requested display mode onto one the host knows.
    fn set_display_mode(&self, mode: &str) -> String;

    /// Called for every property change on the view representation.
    fn on_changed(&mut self, vobj: &mut ViewData, property: &str);

    /// Tree-view icon in XPM format.
    fn icon(&self) -> &str;

    /// State to keep when the document is saved.
    fn get_state(&self) -> Option<Value>;

    /// Restore state produced by `get_state`.
    fn set_state(&mut self, state: Option<Value>);
}
