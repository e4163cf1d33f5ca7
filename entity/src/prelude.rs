pub use super::admin_activity_log::Entity as AdminActivityLog;
pub use super::api_request_log::Entity as ApiRequestLog;
pub use super::authentication_log::Entity as AuthenticationLog;
pub use super::author::Entity as Author;
pub use super::book::Entity as Book;
pub use super::category::Entity as Category;
pub use super::chapter::Entity as Chapter;
pub use super::favorite::Entity as Favorite;
pub use super::performance_log::Entity as PerformanceLog;
pub use super::reading_list::Entity as ReadingList;
pub use super::reading_list_item::Entity as ReadingListItem;
pub use super::reading_progress::Entity as ReadingProgress;
pub use super::reading_session::Entity as ReadingSession;
pub use super::review::Entity as Review;
pub use super::search_log::Entity as SearchLog;
pub use super::user::Entity as User;
pub use super::user_activity_log::Entity as UserActivityLog;
