pub mod error_mapping;
pub mod input;
pub mod render;
pub mod services;

pub use input::InputEvent;
pub use render::{render_cards, render_grid, render_raw, Status};
pub use services::{ForecastService, ForecastServiceMessage, Frame, LoadOutcome, ViewOptions};
