//! Structured text reports of a lumber document.
//!
//! Reports are plain text so a failing test can print the whole document
//! state in one readable block.

use feature_host::Document;
use shape_kernel::KernelBundle;

use crate::helpers::{mm_to_inches, HarnessError};

/// A complete document report.
pub struct DocumentReport {
    pub document: String,
    pub entries: Vec<ObjectEntry>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// A single object's report entry.
pub struct ObjectEntry {
    pub index: usize,
    pub name: String,
    pub kind: String,
    pub label: String,
    pub properties: Vec<(String, String)>,
    pub topology: Option<(usize, usize, usize)>,
    /// Bounding box maximum corner in inches.
    pub extent_inches: Option<[f64; 3]>,
    pub display_mode: Option<String>,
    pub invalid: bool,
}

impl DocumentReport {
    pub fn build(doc: &Document, kb: &dyn KernelBundle) -> Result<Self, HarnessError> {
        let introspect = kb.as_introspect();
        let entries = doc
            .objects()
            .enumerate()
            .map(|(index, obj)| {
                let data = &obj.data;
                let properties = data
                    .properties()
                    .iter()
                    .filter(|p| p.name != "Label")
                    .map(|p| (p.name.clone(), format_value(&p.value)))
                    .collect();
                let topology = data.shape().map(|s| {
                    (
                        introspect.list_vertices(s).len(),
                        introspect.list_edges(s).len(),
                        introspect.list_faces(s).len(),
                    )
                });
                let extent_inches = data
                    .shape()
                    .and_then(|s| introspect.bounding_box(s))
                    .map(|b| [mm_to_inches(b[3]), mm_to_inches(b[4]), mm_to_inches(b[5])]);
                ObjectEntry {
                    index,
                    name: data.name().to_string(),
                    kind: data.kind().to_string(),
                    label: obj.label().to_string(),
                    properties,
                    topology,
                    extent_inches,
                    display_mode: obj.view.data.display_mode().map(str::to_string),
                    invalid: data.is_invalid(),
                }
            })
            .collect();

        Ok(Self {
            document: doc.name().to_string(),
            entries,
            can_undo: doc.can_undo(),
            can_redo: doc.can_redo(),
        })
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Lumber Document Report: {} ===\n\n", self.document));

        let invalid_count = self.entries.iter().filter(|e| e.invalid).count();
        out.push_str(&format!(
            "Objects ({} objects, {} invalid):\n",
            self.entries.len(),
            invalid_count,
        ));

        for entry in &self.entries {
            let inv = if entry.invalid { " [INVALID]" } else { "" };
            out.push_str(&format!(
                "  [{}] {} \"{}\" label \"{}\"{}\n",
                entry.index, entry.kind, entry.name, entry.label, inv,
            ));
            if !entry.properties.is_empty() {
                let props: Vec<String> = entry
                    .properties
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                out.push_str(&format!("      {}\n", props.join(" | ")));
            }
            if let Some((v, e, f)) = entry.topology {
                let euler = v as i64 - e as i64 + f as i64;
                let euler_status = if euler == 2 { "OK" } else { "WARN" };
                out.push_str(&format!(
                    "      Solid: V={} E={} F={} | Euler V-E+F={} ({})\n",
                    v, e, f, euler, euler_status,
                ));
            } else {
                out.push_str("      Solid: none\n");
            }
            if let Some([x, y, z]) = entry.extent_inches {
                out.push_str(&format!("      Box: {:.2} x {:.2} x {:.2} in\n", x, y, z));
            }
            if let Some(mode) = &entry.display_mode {
                out.push_str(&format!("      Display: {}\n", mode));
            }
        }

        out.push_str(&format!(
            "\nHistory: undo {}, redo {}\n",
            if self.can_undo { "available" } else { "empty" },
            if self.can_redo { "available" } else { "empty" },
        ));
        out
    }
}

fn format_value(value: &lumber_types::PropertyValue) -> String {
    match value.as_length() {
        Some(l) => format!("{:.3} in", l.as_inches()),
        None => value.as_str().map(str::to_string).unwrap_or_else(|| format!("{value:?}")),
    }
}
