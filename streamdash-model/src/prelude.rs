//! Presentation focused snapshot of the types surface.
//! Prefer importing from this module when rendering sessions.

pub use super::ids::{ServerId, SessionKey};
pub use super::image::{FillSize, ImageVariant};
pub use super::item::{Item, ItemKind};
pub use super::server::Server;
pub use super::session::{Session, SessionUser, TranscodingInfo};
