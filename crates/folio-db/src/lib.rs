//! Folio persistence seams
//!
//! Managers talk to storage through the traits in [`traits`]. The in-memory
//! repository backs tests and tooling; the Postgres slug lookup is what a
//! deployed service plugs into the slug allocator.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod traits;

pub use memory::{InMemoryRepository, TakenSlugs};
#[cfg(feature = "postgres")]
pub use postgres::{ContentTable, PgSlugLookup};
pub use traits::{
    PostLikeRepository, Repository, SlugLookup, SluggedRepository, SubscriptionRepository,
};
