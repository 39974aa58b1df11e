//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the three tables of the site: the singleton
//! configuration row, the news feed and the page-view log.

pub mod news;
pub mod page_view;
pub mod site_config;

// Re-export specific types to avoid conflicts
pub use news::{Column as NewsColumn, Entity as News, Model as NewsModel};
pub use page_view::{Column as PageViewColumn, Entity as PageView, Model as PageViewModel};
pub use site_config::{
    Column as SiteConfigColumn, Entity as SiteConfig, Model as SiteConfigModel,
};
