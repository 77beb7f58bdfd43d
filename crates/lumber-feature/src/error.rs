use feature_host::PropertyError;
use lumber_types::LengthParseError;
use shape_kernel::KernelError;

/// Errors raised by the lumber behavior.
#[derive(Debug, thiserror::Error)]
pub enum LumberError {
    #[error("malformed nominal size {size:?}, expected <depth>x<width>")]
    MalformedSize { size: String },

    #[error("unknown nominal code {code:?} in size {size:?}")]
    UnknownNominal { size: String, code: String },

    #[error("invalid dimension: {0}")]
    Length(#[from] LengthParseError),

    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}
