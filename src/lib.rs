pub mod app;
pub mod config;
pub mod database;
pub mod http;
pub mod models;
pub mod schema;
pub mod store;
pub mod util;

pub use app::App;
