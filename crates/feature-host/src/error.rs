use crate::object::ObjectId;

/// Error returned by delegate callbacks. Delegates define their own error
/// types; the host carries them opaquely and hands them back to the caller.
pub type ProxyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from property registration and assignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("property already exists: {name}")]
    AlreadyExists { name: String },

    #[error("property not found: {name}")]
    NotFound { name: String },

    #[error("property {name} expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{value:?} is not a choice of enumeration property {name}")]
    NotInEnumeration { name: String, value: String },

    #[error("invalid quantity for {name}: {source}")]
    InvalidQuantity {
        name: String,
        #[source]
        source: lumber_types::LengthParseError,
    },

    #[error("choices of enumeration property {name} are fixed")]
    ChoicesFixed { name: String },
}

/// Errors surfaced by the host framework.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no active document")]
    NoActiveDocument,

    #[error("document not found: {name}")]
    DocumentNotFound { name: String },

    #[error("object not found: {id}")]
    ObjectNotFound { id: ObjectId },

    #[error("object {id} has no feature proxy")]
    NoProxy { id: ObjectId },

    #[error("object {id} has no shape")]
    NoShape { id: ObjectId },

    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    #[error("kernel error: {0}")]
    Kernel(#[from] shape_kernel::KernelError),

    #[error("{callback} failed on {object}: {source}")]
    Proxy {
        object: String,
        callback: &'static str,
        #[source]
        source: ProxyError,
    },

    #[error("change cascade exceeded {limit} notifications")]
    ChangeCascadeOverflow { limit: usize },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

impl HostError {
    /// The delegate's own error, if this failure came from a proxy callback.
    pub fn proxy_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            HostError::Proxy { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
