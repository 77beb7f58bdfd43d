//! Host document framework for parametric features.
//!
//! A [`Document`] owns generic objects. Application-specific behavior is
//! supplied by delegates: a [`FeatureBehavior`] attached as the object's
//! proxy and a [`ViewBehavior`] attached to its view representation. The
//! host calls back into them on creation, property change and recompute.

pub mod application;
pub mod config;
pub mod document;
pub mod error;
pub mod object;
pub mod property;
pub mod proxy;
pub mod transaction;

pub use application::Application;
pub use config::HostConfig;
pub use document::{Document, RecomputeReport};
pub use error::{HostError, PropertyError, ProxyError};
pub use object::{DocumentObject, ObjectData, ObjectId, ViewData, ViewObject, BUILTIN_DISPLAY_MODES};
pub use property::{Property, PropertyBag};
pub use proxy::{FeatureBehavior, ViewBehavior};
