// Application layer - use cases and orchestration over the repository.

pub mod auth;
pub mod error;
pub mod reporting;
pub mod service;

pub use auth::{AdminAuth, SecretAuth};
pub use error::AppError;
pub use reporting::{CategoryTotal, MonthDashboard};
pub use service::ExpenseService;
