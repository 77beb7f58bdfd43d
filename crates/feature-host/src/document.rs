use lumber_types::PropertyValue;
use shape_kernel::{KernelBundle, RenderMesh};
use tracing::{debug, info, instrument, warn};

use crate::config::HostConfig;
use crate::error::HostError;
use crate::object::{DocumentObject, ObjectId};
use crate::proxy::{FeatureBehavior, ViewBehavior};
use crate::transaction::{Transaction, UndoStack};

/// Outcome of a document recompute.
#[derive(Debug, Default)]
pub struct RecomputeReport {
    /// Objects whose shape was rebuilt.
    pub recomputed: usize,
    /// Objects that failed, with error messages.
    pub errors: Vec<(ObjectId, String)>,
}

impl RecomputeReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A host document: an ordered set of objects plus edit history.
pub struct Document {
    name: String,
    objects: Vec<DocumentObject>,
    history: UndoStack,
    config: HostConfig,
}

impl Document {
    pub fn new(name: &str, config: HostConfig) -> Self {
        Self {
            name: name.to_string(),
            objects: Vec::new(),
            history: UndoStack::new(config.undo_limit),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Create a generic object. Internal names are made unique by appending
    /// a three-digit counter: `Lumber`, `Lumber001`, `Lumber002`, ...
    pub fn add_object(&mut self, kind: &str, name: &str) -> ObjectId {
        let name = self.unique_name(name);
        let id = ObjectId::new();
        debug!(document = %self.name, kind, name = %name, "adding object");
        self.objects.push(DocumentObject::new(id, kind, &name));
        id
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |n: &str| self.objects.iter().any(|o| o.data.name() == n);
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}{i:03}"))
            .find(|n| !taken(n))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn object(&self, id: ObjectId) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_by_name(&self, name: &str) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.data.name() == name)
    }

    pub fn object_by_label(&self, label: &str) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.label() == label)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DocumentObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove an object, releasing its shape and forgetting its history.
    pub fn remove_object(
        &mut self,
        id: ObjectId,
        kernel: &mut dyn KernelBundle,
    ) -> Result<(), HostError> {
        let pos = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(HostError::ObjectNotFound { id })?;
        let obj = self.objects.remove(pos);
        if let Some(shape) = obj.data.shape() {
            kernel.release(shape);
        }
        self.history.forget(id);
        Ok(())
    }

    /// Attach a behavior delegate. The delegate's `on_create` registers its
    /// properties; writes made during creation raise no notifications.
    pub fn attach_proxy(
        &mut self,
        id: ObjectId,
        mut proxy: Box<dyn FeatureBehavior>,
    ) -> Result<(), HostError> {
        let obj = find_mut(&mut self.objects, id)?;
        proxy
            .on_create(&mut obj.data)
            .map_err(|source| HostError::Proxy {
                object: obj.data.name().to_string(),
                callback: "on_create",
                source,
            })?;
        obj.data.clear_touched();
        info!(object = %obj.data.name(), proxy = proxy.type_name(), "attached feature proxy");
        obj.proxy = Some(proxy);
        Ok(())
    }

    /// Attach a view delegate, merge its display modes and select its
    /// default mode.
    pub fn attach_view_proxy(
        &mut self,
        id: ObjectId,
        mut view: Box<dyn ViewBehavior>,
    ) -> Result<(), HostError> {
        let obj = find_mut(&mut self.objects, id)?;
        let vdata = &mut obj.view.data;

        view.attach(vdata);
        let modes = view.display_modes(vdata);
        vdata.add_display_modes(&modes);

        let mode = view.set_display_mode(&view.default_display_mode());
        vdata.assign("DisplayMode", PropertyValue::string(mode))?;

        debug!(object = %obj.data.name(), mode = ?vdata.display_mode(), "attached view proxy");
        obj.view.proxy = Some(view);
        Ok(())
    }

    /// Replace an object's view delegate with a fresh one, handing over the
    /// old delegate's saved state as the host does on document reload.
    pub fn reload_view_proxy(
        &mut self,
        id: ObjectId,
        mut fresh: Box<dyn ViewBehavior>,
    ) -> Result<(), HostError> {
        let obj = find_mut(&mut self.objects, id)?;
        let state = obj.view.proxy.take().and_then(|old| old.get_state());
        fresh.set_state(state);
        self.attach_view_proxy(id, fresh)
    }

    /// Write a property and deliver the resulting change notifications.
    ///
    /// The write and every derived write made by the delegates form one
    /// transaction. If any callback fails, every property touched by the
    /// transaction is restored, the object is re-executed, and the error
    /// is returned.
    pub fn set_property(
        &mut self,
        id: ObjectId,
        name: &str,
        value: PropertyValue,
        kernel: &mut dyn KernelBundle,
    ) -> Result<(), HostError> {
        let config = self.config;
        let obj = find_mut(&mut self.objects, id)?;

        obj.data.begin_journal();
        let mut result = match obj.data.set(name, value) {
            Ok(()) => drain_changes(obj, kernel, config.max_change_cascade),
            Err(e) => Err(e.into()),
        };
        if result.is_ok()
            && config.auto_recompute
            && obj.proxy.is_some()
            && obj.data.needs_recompute()
        {
            result = execute_object(obj, kernel, config.max_change_cascade);
        }
        let journal = obj.data.end_journal();

        match result {
            Ok(()) => {
                if !journal.is_empty() {
                    let after = obj.data.snapshot(journal.iter().map(|(n, _)| n.clone()));
                    self.history.push(Transaction {
                        object: id,
                        trigger: name.to_string(),
                        before: journal,
                        after,
                    });
                }
                Ok(())
            }
            Err(err) => {
                warn!(object = %obj.data.name(), property = name, error = %err, "rolling back transaction");
                obj.data.clear_touched();
                if !journal.is_empty() {
                    obj.data.restore_values(&journal);
                    if let Err(e) = execute_object(obj, kernel, config.max_change_cascade) {
                        warn!(object = %obj.data.name(), error = %e, "recompute after rollback failed");
                    }
                }
                Err(err)
            }
        }
    }

    /// Write a property of an object's view representation.
    pub fn set_view_property(
        &mut self,
        id: ObjectId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        let obj = find_mut(&mut self.objects, id)?;
        if obj.view.data.assign(name, value)? {
            if let Some(view) = obj.view.proxy.as_mut() {
                view.on_changed(&mut obj.view.data, name);
            }
        }
        Ok(())
    }

    /// Switch display mode, letting the view delegate map the name first.
    pub fn set_display_mode(&mut self, id: ObjectId, mode: &str) -> Result<(), HostError> {
        let obj = find_mut(&mut self.objects, id)?;
        let mapped = match obj.view.proxy.as_ref() {
            Some(view) => view.set_display_mode(mode),
            None => mode.to_string(),
        };
        self.set_view_property(id, "DisplayMode", PropertyValue::string(mapped))
    }

    /// Rebuild every object that has a behavior delegate, in creation order.
    /// Failures are collected; remaining objects are still rebuilt.
    #[instrument(skip_all, fields(document = %self.name))]
    pub fn recompute(&mut self, kernel: &mut dyn KernelBundle) -> RecomputeReport {
        let limit = self.config.max_change_cascade;
        let mut report = RecomputeReport::default();

        for obj in self.objects.iter_mut() {
            if obj.proxy.is_none() {
                continue;
            }
            match execute_object(obj, kernel, limit) {
                Ok(()) => report.recomputed += 1,
                Err(e) => {
                    warn!(object = %obj.data.name(), error = %e, "recompute failed");
                    report.errors.push((obj.id(), e.to_string()));
                }
            }
        }

        info!(
            recomputed = report.recomputed,
            errors = report.errors.len(),
            "document recomputed"
        );
        report
    }

    /// Rebuild a single object.
    pub fn recompute_object(
        &mut self,
        id: ObjectId,
        kernel: &mut dyn KernelBundle,
    ) -> Result<(), HostError> {
        let limit = self.config.max_change_cascade;
        let obj = find_mut(&mut self.objects, id)?;
        if obj.proxy.is_none() {
            return Err(HostError::NoProxy { id });
        }
        execute_object(obj, kernel, limit)
    }

    /// Tessellate an object's shape for display.
    pub fn mesh(
        &self,
        id: ObjectId,
        kernel: &mut dyn KernelBundle,
    ) -> Result<RenderMesh, HostError> {
        let obj = self.object(id).ok_or(HostError::ObjectNotFound { id })?;
        let shape = obj.data.shape().ok_or(HostError::NoShape { id })?;
        Ok(kernel.tessellate(shape, self.config.tessellation_tolerance)?)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Revert the most recent property transaction and rebuild its object.
    pub fn undo(&mut self, kernel: &mut dyn KernelBundle) -> Result<(), HostError> {
        let limit = self.config.max_change_cascade;
        let tx = self.history.pop_undo().ok_or(HostError::NothingToUndo)?;
        let obj = find_mut(&mut self.objects, tx.object)?;
        debug!(object = %obj.data.name(), trigger = %tx.trigger, "undo");
        obj.data.restore_values(&tx.before);
        let result = execute_object(obj, kernel, limit);
        self.history.push_redo(tx);
        result
    }

    /// Re-apply the most recently undone transaction.
    pub fn redo(&mut self, kernel: &mut dyn KernelBundle) -> Result<(), HostError> {
        let limit = self.config.max_change_cascade;
        let tx = self.history.pop_redo().ok_or(HostError::NothingToRedo)?;
        let obj = find_mut(&mut self.objects, tx.object)?;
        debug!(object = %obj.data.name(), trigger = %tx.trigger, "redo");
        obj.data.restore_values(&tx.after);
        let result = execute_object(obj, kernel, limit);
        self.history.push_undo_only(tx);
        result
    }
}

fn find_mut(objects: &mut [DocumentObject], id: ObjectId) -> Result<&mut DocumentObject, HostError> {
    objects
        .iter_mut()
        .find(|o| o.id() == id)
        .ok_or(HostError::ObjectNotFound { id })
}

/// Deliver queued change notifications to the object's delegates until the
/// queue is empty. Callbacks may queue further notifications.
fn drain_changes(
    obj: &mut DocumentObject,
    kernel: &mut dyn KernelBundle,
    limit: usize,
) -> Result<(), HostError> {
    let mut delivered = 0;
    while let Some(property) = obj.data.pop_touched() {
        delivered += 1;
        if delivered > limit {
            obj.data.clear_touched();
            return Err(HostError::ChangeCascadeOverflow { limit });
        }
        debug!(object = %obj.data.name(), property = %property, "delivering change");

        if let Some(proxy) = obj.proxy.as_ref() {
            proxy
                .on_changed(&mut obj.data, &property, kernel)
                .map_err(|source| HostError::Proxy {
                    object: obj.data.name().to_string(),
                    callback: "on_changed",
                    source,
                })?;
        }
        if let Some(view) = obj.view.proxy.as_mut() {
            view.update_data(&obj.data, &property);
        }
    }
    Ok(())
}

/// Run the behavior's `execute`, deliver the notifications it raised and
/// record the outcome on the object.
fn execute_object(
    obj: &mut DocumentObject,
    kernel: &mut dyn KernelBundle,
    limit: usize,
) -> Result<(), HostError> {
    let Some(proxy) = obj.proxy.as_ref() else {
        return Ok(());
    };
    let result = proxy
        .execute(&mut obj.data, kernel)
        .map_err(|source| HostError::Proxy {
            object: obj.data.name().to_string(),
            callback: "execute",
            source,
        })
        .and_then(|()| drain_changes(obj, kernel, limit));
    obj.data.mark_recomputed(result.is_ok());
    result
}
