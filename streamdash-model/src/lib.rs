//! Core data model definitions shared across streamdash crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod ids;
pub mod image;
pub mod item;
#[cfg(feature = "serde")]
mod lenient;
pub mod prelude;
pub mod server;
pub mod session;
#[cfg(feature = "serde")]
pub mod timestamp;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{ServerId, SessionKey};
pub use image::{FillSize, ImageVariant};
pub use item::{Item, ItemKind};
pub use server::Server;
pub use session::{Session, SessionUser, TranscodingInfo};
