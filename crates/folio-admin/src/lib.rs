//! Folio admin services
//!
//! Back-office create/update/delete for every managed record type, the slug
//! allocator they share and the role guards the HTTP layer runs first.

pub mod guard;
pub mod managers;
pub mod password;
pub mod slug;

pub use guard::{require_authenticated, require_role, Actor, RequestContext, Role};
pub use managers::{
    CategoryManager, CommentManager, FrontPartManager, IncomingManager, OrderManager,
    PortfolioManager, PostLikeManager, PostManager, PostViewManager, ProductManager,
    SubscriberManager, TagManager, UserManager,
};
pub use slug::{SlugAllocator, SlugGenerationError};
