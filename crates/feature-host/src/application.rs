use shape_kernel::KernelBundle;
use tracing::info;

use crate::config::HostConfig;
use crate::document::Document;
use crate::error::HostError;

/// The running host: open documents, the active document and the geometry
/// kernel every document shares.
pub struct Application {
    documents: Vec<Document>,
    active: Option<usize>,
    kernel: Box<dyn KernelBundle>,
    config: HostConfig,
}

impl Application {
    pub fn new(kernel: Box<dyn KernelBundle>) -> Self {
        Self::with_config(kernel, HostConfig::default())
    }

    pub fn with_config(kernel: Box<dyn KernelBundle>, config: HostConfig) -> Self {
        Self {
            documents: Vec::new(),
            active: None,
            kernel,
            config,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Open a new empty document and make it active.
    pub fn new_document(&mut self, name: &str) -> &mut Document {
        info!(document = name, "new document");
        self.documents.push(Document::new(name, self.config));
        let idx = self.documents.len() - 1;
        self.active = Some(idx);
        &mut self.documents[idx]
    }

    pub fn set_active_document(&mut self, name: &str) -> Result<(), HostError> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| HostError::DocumentNotFound {
                name: name.to_string(),
            })?;
        self.active = Some(idx);
        Ok(())
    }

    /// Close a document. If it was active, no document is active afterwards.
    pub fn close_document(&mut self, name: &str) -> Result<(), HostError> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| HostError::DocumentNotFound {
                name: name.to_string(),
            })?;
        let doc = self.documents.remove(idx);
        for obj in doc.objects() {
            if let Some(shape) = obj.data.shape() {
                self.kernel.release(shape);
            }
        }
        self.active = match self.active {
            Some(a) if a == idx => None,
            Some(a) if a > idx => Some(a - 1),
            other => other,
        };
        Ok(())
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|i| self.documents.get(i))
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.active.and_then(|i| self.documents.get_mut(i))
    }

    /// Borrow the active document together with the kernel.
    pub fn active_with_kernel(
        &mut self,
    ) -> Result<(&mut Document, &mut dyn KernelBundle), HostError> {
        let idx = self.active.ok_or(HostError::NoActiveDocument)?;
        let doc = self
            .documents
            .get_mut(idx)
            .ok_or(HostError::NoActiveDocument)?;
        Ok((doc, self.kernel.as_mut()))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn kernel(&self) -> &dyn KernelBundle {
        self.kernel.as_ref()
    }
}
