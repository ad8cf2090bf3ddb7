use getij_core::{AppError, FeedError, ReqwestErrorExt};
use getij_forecast::ForecastError;

/// Classify a forecast fetch failure for logging.
pub fn app_error(e: ForecastError, rpc_name: &str) -> AppError {
    match e {
        ForecastError::Network(err) => AppError::Network(err.into_network_error()),
        ref rpc @ ForecastError::Rpc { .. } if rpc.mentions_function(rpc_name) => {
            AppError::Feed(FeedError::RpcUnavailable(rpc.to_string()))
        }
        ForecastError::Rpc { status: 401, .. } => AppError::Feed(FeedError::InvalidApiKey),
        ForecastError::Rpc { message, .. } => AppError::Feed(FeedError::RpcFailed(message)),
        ForecastError::Payload(s) => AppError::Feed(FeedError::MalformedPayload(s)),
    }
}
