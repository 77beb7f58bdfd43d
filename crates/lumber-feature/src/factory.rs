use feature_host::{Application, Document, HostError, ObjectId};
use tracing::{info, warn};

use crate::lumber::{LabelSuffix, Lumber};
use crate::view::ViewProviderLumber;

/// Host object kind for features with an attached behavior delegate.
pub const FEATURE_KIND: &str = "Part::FeaturePython";

/// Add a lumber board to the active document and recompute it.
///
/// Each board gets the next free label suffix, so a second stud is labelled
/// `2x4_002`. Returns the new object's id. A failed recompute is logged and reported
/// through the object's invalid flag, not returned as an error.
pub fn make_lumber(app: &mut Application) -> Result<ObjectId, HostError> {
    let (doc, kernel) = app.active_with_kernel()?;
    let suffix = next_label_suffix(doc);
    let id = doc.add_object(FEATURE_KIND, "Lumber");
    doc.attach_proxy(id, Box::new(Lumber::with_suffix(suffix)))?;
    doc.attach_view_proxy(id, Box::new(ViewProviderLumber))?;

    let report = doc.recompute(kernel);
    for (failed, message) in &report.errors {
        warn!(object = %failed, error = %message, "recompute after make_lumber failed");
    }
    info!(document = %doc.name(), object = %id, "created lumber");
    Ok(id)
}

/// Smallest `001`-style suffix not already ending a label in `doc`.
fn next_label_suffix(doc: &Document) -> LabelSuffix {
    let taken = |suffix: &str| {
        doc.objects()
            .any(|o| o.label().rsplit_once('_').is_some_and(|(_, s)| s == suffix))
    };
    let n = (1u32..)
        .find(|n| !taken(&format!("{n:03}")))
        .unwrap_or(1);
    LabelSuffix::new(format!("{n:03}"))
}
