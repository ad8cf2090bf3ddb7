pub mod forecast_service;

pub use forecast_service::{
    present, ForecastService, ForecastServiceMessage, Frame, LoadOutcome, ViewOptions,
};
