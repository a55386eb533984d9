use service_core::error::AppError;
use thiserror::Error;

/// Transport class a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadRequest,
    Forbidden,
    InternalServerError,
    /// Raw store failure, surfaced unchanged.
    Passthrough,
}

#[derive(Error, Debug)]
pub enum EntitlementError {
    #[error("validate:invalidParams")]
    InvalidParams,

    #[error("validate:unregistered")]
    Unregistered,

    #[error("validate:wrongCustomer")]
    WrongCustomer,

    #[error("validate:wrongData")]
    WrongData,

    #[error("validate:wrongData: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("validate:inactiveSubscription")]
    InactiveSubscription,

    #[error("validate:invalidPrice")]
    InvalidPrice,

    #[error("validate:invalidQuota")]
    InvalidQuota,

    #[error("validate:invalidDuration")]
    InvalidDuration,

    #[error("validate:invalidIntervalTime")]
    InvalidIntervalTime,

    #[error("validate:invalidDate")]
    InvalidDate,

    #[error("validate:invalidTrialDuration")]
    InvalidTrialDuration,

    #[error("validate:invalidType")]
    InvalidType,

    #[error("validate:expired")]
    Expired,

    #[error("Store error: {0}")]
    Store(anyhow::Error),
}

impl EntitlementError {
    /// Stable code used in responses, logs and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            EntitlementError::InvalidParams => "validate:invalidParams",
            EntitlementError::Unregistered => "validate:unregistered",
            EntitlementError::WrongCustomer => "validate:wrongCustomer",
            EntitlementError::WrongData | EntitlementError::Decode(_) => "validate:wrongData",
            EntitlementError::InactiveSubscription => "validate:inactiveSubscription",
            EntitlementError::InvalidPrice => "validate:invalidPrice",
            EntitlementError::InvalidQuota => "validate:invalidQuota",
            EntitlementError::InvalidDuration => "validate:invalidDuration",
            EntitlementError::InvalidIntervalTime => "validate:invalidIntervalTime",
            EntitlementError::InvalidDate => "validate:invalidDate",
            EntitlementError::InvalidTrialDuration => "validate:invalidTrialDuration",
            EntitlementError::InvalidType => "validate:invalidType",
            EntitlementError::Expired => "validate:expired",
            EntitlementError::Store(_) => "validate:storeError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EntitlementError::InvalidParams | EntitlementError::WrongCustomer => {
                ErrorCategory::BadRequest
            }
            EntitlementError::WrongData | EntitlementError::Decode(_) => {
                ErrorCategory::InternalServerError
            }
            EntitlementError::Store(_) => ErrorCategory::Passthrough,
            EntitlementError::Unregistered
            | EntitlementError::InactiveSubscription
            | EntitlementError::InvalidPrice
            | EntitlementError::InvalidQuota
            | EntitlementError::InvalidDuration
            | EntitlementError::InvalidIntervalTime
            | EntitlementError::InvalidDate
            | EntitlementError::InvalidTrialDuration
            | EntitlementError::InvalidType
            | EntitlementError::Expired => ErrorCategory::Forbidden,
        }
    }
}

impl From<EntitlementError> for AppError {
    fn from(err: EntitlementError) -> Self {
        match err.category() {
            ErrorCategory::BadRequest => AppError::BadRequest(anyhow::anyhow!(err.code())),
            ErrorCategory::Forbidden => AppError::Forbidden(anyhow::anyhow!(err.code())),
            ErrorCategory::InternalServerError => AppError::InternalError(anyhow::Error::new(err)),
            ErrorCategory::Passthrough => match err {
                EntitlementError::Store(e) => AppError::InternalError(e),
                other => AppError::InternalError(anyhow::Error::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_business_rule_failures_are_forbidden() {
        for err in [
            EntitlementError::Unregistered,
            EntitlementError::InactiveSubscription,
            EntitlementError::InvalidPrice,
            EntitlementError::InvalidQuota,
            EntitlementError::InvalidDuration,
            EntitlementError::InvalidIntervalTime,
            EntitlementError::InvalidDate,
            EntitlementError::InvalidTrialDuration,
            EntitlementError::InvalidType,
            EntitlementError::Expired,
        ] {
            assert_eq!(err.category(), ErrorCategory::Forbidden, "{}", err.code());
        }
    }

    #[test]
    fn test_request_failures_are_bad_request() {
        assert_eq!(
            EntitlementError::InvalidParams.category(),
            ErrorCategory::BadRequest
        );
        assert_eq!(
            EntitlementError::WrongCustomer.category(),
            ErrorCategory::BadRequest
        );
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(EntitlementError::Expired.to_string(), "validate:expired");
        assert_eq!(
            EntitlementError::InvalidTrialDuration.to_string(),
            EntitlementError::InvalidTrialDuration.code()
        );
    }

    #[test]
    fn test_app_error_status_mapping() {
        let status = |err: EntitlementError| AppError::from(err).into_response().status();

        assert_eq!(status(EntitlementError::InvalidParams), StatusCode::BAD_REQUEST);
        assert_eq!(status(EntitlementError::Unregistered), StatusCode::FORBIDDEN);
        assert_eq!(
            status(EntitlementError::WrongData),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(EntitlementError::Store(anyhow::anyhow!("connection reset"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_keeps_source_message() {
        let err = EntitlementError::Store(anyhow::anyhow!("connection reset"));
        assert_eq!(err.category(), ErrorCategory::Passthrough);
        assert!(err.to_string().contains("connection reset"));
    }
}
