//! Error types.
//!
//! `AppError` is the only error that crosses the binary boundary: it carries the
//! process exit code alongside the message. The typed errors below are produced
//! by the fetcher and the GPIO drivers and converted at the edges.

/// Summary could not be written.
pub const EXIT_REPORT: u8 = 1;
/// Invalid configuration (thresholds, pins, credentials).
pub const EXIT_CONFIG: u8 = 2;
/// Output driver failure.
pub const EXIT_GPIO: u8 = 3;
/// Price fetch failure.
pub const EXIT_FETCH: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to obtain a price reading.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("price request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("price request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to parse price response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("price response contained no records")]
    Empty,
}

/// Failure reported by an output driver.
#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error("output driver used before initialize()")]
    NotInitialized,
    #[error("pin {0} is not configured as an output")]
    NotConfigured(u8),
    #[error("header pin {0} is not a GPIO line")]
    NotGpio(u8),
    #[error("GPIO backend error: {0}")]
    Backend(String),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(EXIT_FETCH, err.to_string())
    }
}

impl From<GpioError> for AppError {
    fn from(err: GpioError) -> Self {
        AppError::new(EXIT_GPIO, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_map_to_exit_codes() {
        let fetch: AppError = FetchError::Empty.into();
        assert_eq!(fetch.exit_code(), EXIT_FETCH);
        assert_eq!(fetch.to_string(), "price response contained no records");

        let gpio: AppError = GpioError::NotConfigured(19).into();
        assert_eq!(gpio.exit_code(), EXIT_GPIO);
        assert!(gpio.to_string().contains("19"));
    }
}
