//! Maps forecast errors to getij_core::AppError for consistent user-facing messages.

mod forecast;

pub use forecast::app_error;
