pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod modules;
pub mod services;

pub use infrastructure::config;
pub use modules::export;
pub use modules::import;
pub use modules::metadata;
