//! Parametric dimensional lumber for the feature host.
//!
//! [`make_lumber`] adds a board to the active document. Its [`Lumber`]
//! behavior resolves the nominal `Size` into actual `Width` and `Height`
//! and rebuilds a box shape; [`ViewProviderLumber`] supplies display
//! metadata.

pub mod dimensions;
pub mod error;
pub mod factory;
pub mod lumber;
pub mod view;

pub use dimensions::resolve_actual;
pub use error::LumberError;
pub use factory::{make_lumber, FEATURE_KIND};
pub use lumber::{LabelSuffix, Lumber};
pub use view::{ViewProviderLumber, LUMBER_ICON_XPM};
