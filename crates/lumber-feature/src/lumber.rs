//! The lumber feature behavior.

use feature_host::{FeatureBehavior, ObjectData, ProxyError};
use lumber_types::{EditorMode, Length, NominalSize, PropertyValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shape_kernel::KernelBundle;
use tracing::{info, warn};

use crate::dimensions::resolve_actual;
use crate::error::LumberError;

const GROUP: &str = "Lumber";

/// Numeric suffix of a lumber label, e.g. `001` in `2x4_001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSuffix(String);

impl LabelSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label for a board of the given nominal size.
    pub fn label_for(&self, size: &str) -> String {
        format!("{size}_{}", self.0)
    }
}

impl Default for LabelSuffix {
    fn default() -> Self {
        Self::new("001")
    }
}

#[derive(Serialize, Deserialize)]
struct LumberState {
    suffix: LabelSuffix,
}

/// Behavior delegate for a board of dimensional lumber.
///
/// Registers `Length`, `Width`, `Height` and `Size`. A `Size` change resolves
/// the nominal code into actual `Width` and `Height`, renames the label and
/// rebuilds the shape.
#[derive(Debug, Default)]
pub struct Lumber {
    suffix: LabelSuffix,
}

impl Lumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffix(suffix: LabelSuffix) -> Self {
        Self { suffix }
    }

    pub fn suffix(&self) -> &LabelSuffix {
        &self.suffix
    }

    fn register(&self, obj: &mut ObjectData) -> Result<(), LumberError> {
        let default_size = NominalSize::default();
        obj.add_property(
            "Length",
            GROUP,
            "Length of the lumber",
            PropertyValue::length(Length::from_feet(8.0)?),
        )?;
        obj.add_property(
            "Width",
            GROUP,
            "Width of the lumber",
            PropertyValue::length(Length::from_inches(default_size.actual_width_inches())?),
        )?;
        obj.add_property(
            "Height",
            GROUP,
            "Height of the lumber",
            PropertyValue::length(Length::from_inches(default_size.actual_height_inches())?),
        )?;
        obj.add_enumeration(
            "Size",
            GROUP,
            "Nominal Dimensions",
            NominalSize::codes(),
            default_size.code(),
        )?;

        let size = obj.text("Size")?.to_string();
        obj.set_label(&self.suffix.label_for(&size))?;

        obj.set_editor_mode("Width", EditorMode::ReadOnly)?;
        obj.set_editor_mode("Height", EditorMode::ReadOnly)?;
        Ok(())
    }

    fn apply_size(&self, obj: &mut ObjectData, kernel: &mut dyn KernelBundle) -> Result<(), LumberError> {
        let size = obj.text("Size")?.to_string();
        let (width, height) = resolve_actual(&size)?;
        obj.set("Width", PropertyValue::length(width))?;
        obj.set("Height", PropertyValue::length(height))?;
        obj.set_label(&self.suffix.label_for(&size))?;
        self.rebuild(obj, kernel)
    }

    fn rebuild(&self, obj: &mut ObjectData, kernel: &mut dyn KernelBundle) -> Result<(), LumberError> {
        info!(object = %obj.name(), "Recompute Lumber feature");
        let solid = kernel.make_box(
            obj.length("Length")?.as_mm(),
            obj.length("Width")?.as_mm(),
            obj.length("Height")?.as_mm(),
        )?;
        obj.set_shape(solid, kernel);
        Ok(())
    }
}

impl FeatureBehavior for Lumber {
    fn type_name(&self) -> &'static str {
        "Lumber"
    }

    fn on_create(&mut self, obj: &mut ObjectData) -> Result<(), ProxyError> {
        Ok(self.register(obj)?)
    }

    fn on_changed(
        &self,
        obj: &mut ObjectData,
        property: &str,
        kernel: &mut dyn KernelBundle,
    ) -> Result<(), ProxyError> {
        info!(object = %obj.name(), property, "Change property");
        if property == "Size" {
            self.apply_size(obj, kernel)?;
        }
        Ok(())
    }

    fn execute(&self, obj: &mut ObjectData, kernel: &mut dyn KernelBundle) -> Result<(), ProxyError> {
        Ok(self.rebuild(obj, kernel)?)
    }

    fn get_state(&self) -> Option<Value> {
        serde_json::to_value(LumberState {
            suffix: self.suffix.clone(),
        })
        .ok()
    }

    fn set_state(&mut self, state: Option<Value>) {
        let Some(state) = state else {
            return;
        };
        match serde_json::from_value::<LumberState>(state) {
            Ok(s) => self.suffix = s.suffix,
            Err(e) => warn!(error = %e, "ignoring unreadable lumber state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_host::{Document, HostConfig, HostError, ObjectId};
    use lumber_types::Enumeration;
    use shape_kernel::{KernelIntrospect, MockKernel};

    fn setup() -> (Document, ObjectId, MockKernel) {
        let mut doc = Document::new("Test", HostConfig::default());
        let id = doc.add_object("Part::FeaturePython", "Lumber");
        doc.attach_proxy(id, Box::new(Lumber::new())).unwrap();
        (doc, id, MockKernel::new())
    }

    fn inches(doc: &Document, id: ObjectId, name: &str) -> f64 {
        doc.object(id).unwrap().data.length(name).unwrap().as_inches()
    }

    #[test]
    fn create_registers_lumber_properties() {
        let (doc, id, _k) = setup();
        let data = &doc.object(id).unwrap().data;
        let names: Vec<&str> = data.properties().names().collect();
        assert_eq!(names, ["Label", "Length", "Width", "Height", "Size"]);
        assert_eq!(data.text("Size").unwrap(), "2x4");
        assert_eq!(data.label(), "2x4_001");
        assert!((data.length("Length").unwrap().as_feet() - 8.0).abs() < 1e-9);
        assert_eq!(data.properties().editor_mode("Width"), Some(EditorMode::ReadOnly));
        assert_eq!(data.properties().editor_mode("Height"), Some(EditorMode::ReadOnly));
        assert_eq!(data.properties().editor_mode("Length"), Some(EditorMode::Editable));
        assert_eq!(data.properties().get("Size").unwrap().group, "Lumber");
    }

    #[test]
    fn create_twice_fails_on_duplicate() {
        let (mut doc, id, _k) = setup();
        let err = doc.attach_proxy(id, Box::new(Lumber::new())).unwrap_err();
        assert!(matches!(err, HostError::Proxy { callback: "on_create", .. }));
    }

    #[test]
    fn size_change_updates_dimensions_and_label() {
        let (mut doc, id, mut k) = setup();
        doc.set_property(id, "Size", PropertyValue::string("4x6"), &mut k)
            .unwrap();
        assert!((inches(&doc, id, "Width") - 5.5).abs() < 1e-9);
        assert!((inches(&doc, id, "Height") - 3.5).abs() < 1e-9);
        assert_eq!(doc.object(id).unwrap().label(), "4x6_001");
    }

    #[test]
    fn custom_suffix_survives_size_changes() {
        let mut doc = Document::new("Test", HostConfig::default());
        let mut k = MockKernel::new();
        let id = doc.add_object("Part::FeaturePython", "Lumber");
        doc.attach_proxy(id, Box::new(Lumber::with_suffix(LabelSuffix::new("017"))))
            .unwrap();
        assert_eq!(doc.object(id).unwrap().label(), "2x4_017");

        doc.set_property(id, "Label", PropertyValue::string("rafter"), &mut k)
            .unwrap();
        doc.set_property(id, "Size", PropertyValue::string("2x10"), &mut k)
            .unwrap();
        assert_eq!(doc.object(id).unwrap().label(), "2x10_017");
    }

    #[test]
    fn size_change_rebuilds_shape() {
        let (mut doc, id, mut k) = setup();
        doc.set_property(id, "Size", PropertyValue::string("1x2"), &mut k)
            .unwrap();
        let shape = doc.object(id).unwrap().data.shape().unwrap();
        let bbox = k.bounding_box(shape).unwrap();
        assert!((bbox[3] - 2438.4).abs() < 1e-6);
        assert!((bbox[4] - 1.5 * 25.4).abs() < 1e-6);
        assert!((bbox[5] - 0.75 * 25.4).abs() < 1e-6);
    }

    #[test]
    fn unknown_size_is_rejected_at_write() {
        let (mut doc, id, mut k) = setup();
        let err = doc
            .set_property(id, "Size", PropertyValue::string("2x5"), &mut k)
            .unwrap_err();
        assert!(matches!(
            err,
            HostError::Property(feature_host::PropertyError::NotInEnumeration { .. })
        ));
        assert_eq!(doc.object(id).unwrap().data.text("Size").unwrap(), "2x4");
    }

    #[test]
    fn size_choices_cannot_be_replaced() {
        let (mut doc, id, mut k) = setup();
        doc.recompute(&mut k);
        let before = k.bounding_box(doc.object(id).unwrap().data.shape().unwrap());

        for choices in [vec!["4x4"], vec!["4x4", "9x9"], vec!["2x4x6"]] {
            let replacement = PropertyValue::Enumeration {
                value: Enumeration::new(choices.iter().map(|c| c.to_string()).collect()),
            };
            let err = doc.set_property(id, "Size", replacement, &mut k).unwrap_err();
            assert!(
                matches!(err, HostError::Property(feature_host::PropertyError::ChoicesFixed { .. })),
                "{choices:?}: {err}"
            );
        }

        let data = &doc.object(id).unwrap().data;
        let Ok(PropertyValue::Enumeration { value }) = data.properties().value("Size") else {
            panic!("Size is not an enumeration");
        };
        assert_eq!(value.choices(), NominalSize::codes().as_slice());
        assert_eq!(data.label(), "2x4_001");
        assert_eq!(k.bounding_box(data.shape().unwrap()), before);

        doc.set_property(id, "Size", PropertyValue::string("4x4"), &mut k)
            .unwrap();
        doc.set_property(id, "Size", PropertyValue::string("2x4"), &mut k)
            .unwrap();
        assert_eq!(doc.object(id).unwrap().label(), "2x4_001");
    }

    #[test]
    fn state_round_trips_suffix() {
        let lumber = Lumber::with_suffix(LabelSuffix::new("042"));
        let state = lumber.get_state();
        let mut fresh = Lumber::new();
        fresh.set_state(state);
        assert_eq!(fresh.suffix().as_str(), "042");

        fresh.set_state(Some(serde_json::json!({"unexpected": true})));
        assert_eq!(fresh.suffix().as_str(), "042");
    }
}
