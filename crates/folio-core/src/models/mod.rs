//! Data models for the application
//!
//! Plain records for every admin-managed entity plus the payload DTOs that the
//! HTTP boundary deserializes into. Associations are held as ids; nothing here
//! loads lazily.

mod category;
mod comment;
mod front_part;
mod incoming;
mod order;
mod portfolio;
mod post;
mod post_like;
mod product;
mod subscription;
mod tag;
mod user;

pub use category::*;
pub use comment::*;
pub use front_part::*;
pub use incoming::*;
pub use order::*;
pub use portfolio::*;
pub use post::*;
pub use post_like::*;
pub use product::*;
pub use subscription::*;
pub use tag::*;
pub use user::*;

use uuid::Uuid;
use validator::ValidationError;

/// A persisted record with a stable identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// A record addressed publicly by a unique slug.
pub trait Sluggable: Entity {
    fn slug(&self) -> &str;
}

/// Rejects titles that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
