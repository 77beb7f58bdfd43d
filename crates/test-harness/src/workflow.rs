//! LumberBuilder: fluent API for scripting lumber documents in tests.
//!
//! Drives a real `Application` through the same entry points a user edit
//! takes. All methods accept test-chosen names instead of object ids.

use std::collections::HashMap;

use feature_host::{Application, Document, DocumentObject, HostConfig, ObjectId, RecomputeReport};
use lumber_feature::make_lumber;
use lumber_types::PropertyValue;
use shape_kernel::{KernelBundle, KernelSolidHandle, MockKernel, RenderMesh, TruckKernel};

use crate::helpers::*;
use crate::report::DocumentReport;

/// A fluent builder for creating and verifying lumber documents in tests.
pub struct LumberBuilder {
    pub app: Application,
    named: HashMap<String, ObjectId>,
    history: Vec<(String, String)>,
}

impl LumberBuilder {
    /// Create a new LumberBuilder with MockKernel (deterministic, fast).
    pub fn mock() -> Self {
        Self::with_kernel(Box::new(MockKernel::new()), HostConfig::default())
    }

    /// Create a new LumberBuilder with TruckKernel (real geometry).
    pub fn truck() -> Self {
        Self::with_kernel(Box::new(TruckKernel::new()), HostConfig::default())
    }

    pub fn with_kernel(kernel: Box<dyn KernelBundle>, config: HostConfig) -> Self {
        init_test_logging();
        let mut app = Application::with_config(kernel, config);
        app.new_document("Unnamed");
        Self {
            app,
            named: HashMap::new(),
            history: Vec::new(),
        }
    }

    // ── Edits ───────────────────────────────────────────────────────────

    /// Add a board through `make_lumber` and remember it as `name`.
    pub fn make_lumber(&mut self, name: &str) -> Result<ObjectId, HarnessError> {
        if self.named.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = make_lumber(&mut self.app)?;
        self.named.insert(name.to_string(), id);
        self.history.push((name.to_string(), "MakeLumber".to_string()));
        Ok(id)
    }

    /// Write any property of a named object.
    pub fn set(&mut self, name: &str, property: &str, value: PropertyValue) -> Result<&mut Self, HarnessError> {
        let id = self.id(name)?;
        let (doc, kernel) = self.app.active_with_kernel()?;
        doc.set_property(id, property, value, kernel)?;
        self.history
            .push((name.to_string(), format!("Set {property}")));
        Ok(self)
    }

    /// Select a nominal size, e.g. `"4x4"`.
    pub fn set_size(&mut self, name: &str, size: &str) -> Result<&mut Self, HarnessError> {
        self.set(name, "Size", PropertyValue::string(size))
    }

    /// Set the length from a quantity string, e.g. `"10 ft"`.
    pub fn set_length(&mut self, name: &str, length: &str) -> Result<&mut Self, HarnessError> {
        self.set(name, "Length", PropertyValue::string(length))
    }

    pub fn set_label(&mut self, name: &str, label: &str) -> Result<&mut Self, HarnessError> {
        self.set(name, "Label", PropertyValue::string(label))
    }

    pub fn set_display_mode(&mut self, name: &str, mode: &str) -> Result<&mut Self, HarnessError> {
        let id = self.id(name)?;
        self.document_mut()?.set_display_mode(id, mode)?;
        Ok(self)
    }

    pub fn recompute(&mut self) -> Result<RecomputeReport, HarnessError> {
        let (doc, kernel) = self.app.active_with_kernel()?;
        Ok(doc.recompute(kernel))
    }

    pub fn undo(&mut self) -> Result<&mut Self, HarnessError> {
        let (doc, kernel) = self.app.active_with_kernel()?;
        doc.undo(kernel)?;
        self.history.push(("document".to_string(), "Undo".to_string()));
        Ok(self)
    }

    pub fn redo(&mut self) -> Result<&mut Self, HarnessError> {
        let (doc, kernel) = self.app.active_with_kernel()?;
        doc.redo(kernel)?;
        self.history.push(("document".to_string(), "Redo".to_string()));
        Ok(self)
    }

    pub fn remove(&mut self, name: &str) -> Result<(), HarnessError> {
        let id = self.id(name)?;
        let (doc, kernel) = self.app.active_with_kernel()?;
        doc.remove_object(id, kernel)?;
        self.named.remove(name);
        self.history.push((name.to_string(), "Remove".to_string()));
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn id(&self, name: &str) -> Result<ObjectId, HarnessError> {
        self.named
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    /// Names registered through this builder, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.named.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn document(&self) -> Result<&Document, HarnessError> {
        Ok(self
            .app
            .active_document()
            .ok_or(feature_host::HostError::NoActiveDocument)?)
    }

    pub fn document_mut(&mut self) -> Result<&mut Document, HarnessError> {
        Ok(self
            .app
            .active_document_mut()
            .ok_or(feature_host::HostError::NoActiveDocument)?)
    }

    pub fn object(&self, name: &str) -> Result<&DocumentObject, HarnessError> {
        let id = self.id(name)?;
        self.document()?
            .object(id)
            .ok_or_else(|| HarnessError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    pub fn size(&self, name: &str) -> Result<String, HarnessError> {
        let obj = self.object(name)?;
        Ok(obj
            .data
            .text("Size")
            .map_err(feature_host::HostError::from)?
            .to_string())
    }

    pub fn label(&self, name: &str) -> Result<String, HarnessError> {
        Ok(self.object(name)?.label().to_string())
    }

    /// A length property in inches.
    pub fn inches(&self, name: &str, property: &str) -> Result<f64, HarnessError> {
        let obj = self.object(name)?;
        let length = obj
            .data
            .length(property)
            .map_err(feature_host::HostError::from)?;
        Ok(length.as_inches())
    }

    /// `(length, width, height)` in inches.
    pub fn dims_inches(&self, name: &str) -> Result<(f64, f64, f64), HarnessError> {
        Ok((
            self.inches(name, "Length")?,
            self.inches(name, "Width")?,
            self.inches(name, "Height")?,
        ))
    }

    pub fn solid(&self, name: &str) -> Result<&KernelSolidHandle, HarnessError> {
        self.object(name)?
            .data
            .shape()
            .ok_or_else(|| HarnessError::NoSolid {
                name: name.to_string(),
            })
    }

    /// Bounding box of the object's solid in millimetres.
    pub fn bounding_box(&self, name: &str) -> Result<[f64; 6], HarnessError> {
        let solid = self.solid(name)?;
        self.app
            .kernel()
            .as_introspect()
            .bounding_box(solid)
            .ok_or_else(|| HarnessError::NoSolid {
                name: name.to_string(),
            })
    }

    /// Get topology counts (V, E, F) for an object's solid.
    pub fn topology_counts(&self, name: &str) -> Result<(usize, usize, usize), HarnessError> {
        let solid = self.solid(name)?;
        let introspect = self.app.kernel().as_introspect();
        Ok((
            introspect.list_vertices(solid).len(),
            introspect.list_edges(solid).len(),
            introspect.list_faces(solid).len(),
        ))
    }

    pub fn tessellate(&mut self, name: &str) -> Result<RenderMesh, HarnessError> {
        let id = self.id(name)?;
        let (doc, kernel) = self.app.active_with_kernel()?;
        Ok(doc.mesh(id, kernel)?)
    }

    /// Steps performed so far as `(subject, action)`.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    pub fn report(&self) -> Result<DocumentReport, HarnessError> {
        DocumentReport::build(self.document()?, self.app.kernel())
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert actual `(length, width, height)` in inches.
    pub fn assert_dims(&self, name: &str, length: f64, width: f64, height: f64) -> Result<(), HarnessError> {
        let actual = self.dims_inches(name)?;
        crate::assertions::assert_close3(
            [actual.0, actual.1, actual.2],
            [length, width, height],
            1e-9,
            &format!("{name} dimensions (in)"),
        )
    }

    /// Assert the solid spans `(0,0,0)` to `(length, width, height)` inches.
    pub fn assert_box_inches(&self, name: &str, length: f64, width: f64, height: f64) -> Result<(), HarnessError> {
        let solid = self.solid(name)?;
        crate::assertions::assert_box_inches(self.app.kernel(), solid, [length, width, height], 1e-6, name)
    }

    pub fn assert_label(&self, name: &str, expected: &str) -> Result<(), HarnessError> {
        crate::assertions::assert_label(self.object(name)?, expected)
    }

    /// Assert no object in the document is flagged invalid.
    pub fn assert_all_valid(&self) -> Result<(), HarnessError> {
        let invalid: Vec<&str> = self
            .document()?
            .objects()
            .filter(|o| o.data.is_invalid())
            .map(|o| o.data.name())
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("invalid objects: {}", invalid.join(", ")),
            })
        }
    }
}
