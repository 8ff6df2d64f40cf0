use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::bonus::RealisasiImportError;
use crate::workflows::payroll::{PayrollServiceError, StoreError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(RealisasiImportError),
    Payroll(PayrollServiceError),
    Report(csv::Error),
    Json(serde_json::Error),
    UnknownDivision(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "realisasi import error: {}", err),
            AppError::Payroll(err) => write!(f, "payroll error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::UnknownDivision(name) => write!(f, "division '{}' not found", name),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Payroll(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::UnknownDivision(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RealisasiImportError> for AppError {
    fn from(value: RealisasiImportError) -> Self {
        Self::Import(value)
    }
}

impl From<PayrollServiceError> for AppError {
    fn from(value: PayrollServiceError) -> Self {
        Self::Payroll(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Payroll(PayrollServiceError::Store(value))
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Report(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
