pub mod error;
pub mod health;
pub mod listings;
pub mod shop;

pub use error::AppError;
