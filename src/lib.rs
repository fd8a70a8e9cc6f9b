pub mod error;
pub mod models {
    pub mod app_entry;
    pub mod post;
    pub mod record;
}
pub mod rendering {
    pub mod markdown;
}
pub mod query {
    pub mod debounce;
    pub mod engine;
}
pub mod source {
    pub mod client;
    pub mod inline;
    pub mod loader;
}
pub mod db {
    pub mod app_repository;
    pub mod post_repository;
}
pub mod demo_seeder;
pub mod api {
    pub mod apps;
    pub mod blog;
    pub mod errors;
}

#[cfg(feature = "ssr")]
pub mod app;
#[cfg(feature = "ssr")]
pub mod config;
