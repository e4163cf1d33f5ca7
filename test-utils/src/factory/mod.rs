//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own module with a `Factory` struct
//! for customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::create_user(&db).await?;
//!
//!     // Create a book together with its author and category
//!     let (author, category, book) = factory::helpers::create_book_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("admin@example.com")
//!     .admin(true)
//!     .build()
//!     .await?;
//! ```

pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod favorite;
pub mod helpers;
pub mod reading_list;
pub mod reading_progress;
pub mod review;
pub mod user;

pub use author::create_author;
pub use book::create_book;
pub use category::create_category;
pub use chapter::create_chapter;
pub use favorite::create_favorite;
pub use reading_list::create_reading_list;
pub use reading_progress::create_reading_progress;
pub use review::create_review;
pub use user::{create_admin, create_user};
