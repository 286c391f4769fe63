pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod services;
pub mod widget;

pub use config::{Config, WidgetConfig};
pub use error::{AppError, AppResult};
pub use widget::Widget;
