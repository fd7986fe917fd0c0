//! Shared setup for admin manager tests.
//!
//! Every test gets in-memory repositories and a local storage root inside its
//! own temporary directory.

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_admin::{
    Actor, CategoryManager, CommentManager, FrontPartManager, IncomingManager, OrderManager,
    PortfolioManager, PostLikeManager, PostManager, PostViewManager, ProductManager, Role,
    SlugAllocator, SubscriberManager, TagManager, UserManager,
};
use folio_core::models::{
    Category, Comment, FrontPart, Incoming, Order, Portfolio, Post, PostLike, Product,
    Subscription, Tag, User,
};
use folio_core::UploadArea;
use folio_db::InMemoryRepository;
use folio_processing::{AllowList, FileNameGenerator, UploadIngestor, UploadValidator};
use folio_storage::LocalStorage;
use tempfile::TempDir;
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: u64 = 1024 * 1024;

pub struct TestEnv {
    pub tmp: TempDir,
    pub storage_root: PathBuf,
    pub uploads: UploadIngestor,
    pub slugs: SlugAllocator,
    pub categories: InMemoryRepository<Category>,
    pub tags: InMemoryRepository<Tag>,
    pub posts: InMemoryRepository<Post>,
    pub portfolio: InMemoryRepository<Portfolio>,
    pub products: InMemoryRepository<Product>,
    pub orders: InMemoryRepository<Order>,
    pub front_parts: InMemoryRepository<FrontPart>,
    pub comments: InMemoryRepository<Comment>,
    pub users: InMemoryRepository<User>,
    pub likes: InMemoryRepository<PostLike>,
    pub subscriptions: InMemoryRepository<Subscription>,
    pub incomings: InMemoryRepository<Incoming>,
}

pub async fn setup_test_env() -> TestEnv {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let storage_root = tmp.path().join("public/storage");
    let storage = LocalStorage::new(&storage_root, "/storage".to_string())
        .await
        .expect("create local storage");

    let uploads = UploadIngestor::new(
        UploadValidator::new(AllowList::default(), MAX_UPLOAD_BYTES),
        FileNameGenerator::default(),
        Arc::new(storage),
    );

    TestEnv {
        tmp,
        storage_root,
        uploads,
        slugs: SlugAllocator::default(),
        categories: InMemoryRepository::new(),
        tags: InMemoryRepository::new(),
        posts: InMemoryRepository::new(),
        portfolio: InMemoryRepository::new(),
        products: InMemoryRepository::new(),
        orders: InMemoryRepository::new(),
        front_parts: InMemoryRepository::new(),
        comments: InMemoryRepository::new(),
        users: InMemoryRepository::new(),
        likes: InMemoryRepository::new(),
        subscriptions: InMemoryRepository::new(),
        incomings: InMemoryRepository::new(),
    }
}

impl TestEnv {
    pub fn admin(&self) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Admin".to_string(),
            roles: vec![Role::User, Role::Admin],
        }
    }

    pub fn spool_dir(&self) -> &Path {
        self.tmp.path()
    }

    /// Absolute path of a stored upload.
    pub fn stored_path(&self, area: UploadArea, filename: &str) -> PathBuf {
        self.storage_root.join(area.directory()).join(filename)
    }

    /// Filenames currently in an upload area.
    pub fn stored_files(&self, area: UploadArea) -> Vec<String> {
        match std::fs::read_dir(self.storage_root.join(area.directory())) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn category_manager(&self) -> CategoryManager {
        CategoryManager::new(Arc::new(self.categories.clone()), self.slugs)
    }

    pub fn tag_manager(&self) -> TagManager {
        TagManager::new(Arc::new(self.tags.clone()), self.slugs)
    }

    pub fn post_manager(&self) -> PostManager {
        PostManager::new(
            Arc::new(self.posts.clone()),
            Arc::new(self.categories.clone()),
            Arc::new(self.tags.clone()),
            self.uploads.clone(),
            self.slugs,
        )
    }

    pub fn portfolio_manager(&self) -> PortfolioManager {
        PortfolioManager::new(
            Arc::new(self.portfolio.clone()),
            self.uploads.clone(),
            self.slugs,
        )
    }

    pub fn product_manager(&self) -> ProductManager {
        ProductManager::new(
            Arc::new(self.products.clone()),
            Arc::new(self.categories.clone()),
            self.uploads.clone(),
            self.slugs,
        )
    }

    pub fn order_manager(&self) -> OrderManager {
        OrderManager::new(Arc::new(self.orders.clone()), self.slugs)
    }

    pub fn front_part_manager(&self) -> FrontPartManager {
        FrontPartManager::new(Arc::new(self.front_parts.clone()), self.slugs)
    }

    pub fn comment_manager(&self) -> CommentManager {
        CommentManager::new(
            Arc::new(self.comments.clone()),
            Arc::new(self.posts.clone()),
        )
    }

    pub fn user_manager(&self) -> UserManager {
        UserManager::new(Arc::new(self.users.clone()))
    }

    pub fn post_like_manager(&self) -> PostLikeManager {
        PostLikeManager::new(Arc::new(self.likes.clone()), Arc::new(self.posts.clone()))
    }

    pub fn post_view_manager(&self) -> PostViewManager {
        PostViewManager::new(Arc::new(self.posts.clone()))
    }

    pub fn subscriber_manager(&self) -> SubscriberManager {
        SubscriberManager::new(Arc::new(self.subscriptions.clone()))
    }

    pub fn incoming_manager(&self) -> IncomingManager {
        IncomingManager::new(Arc::new(self.incomings.clone()))
    }
}
