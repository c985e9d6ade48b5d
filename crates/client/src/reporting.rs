//! Error reporter that logs and surfaces the message in the shell banner.

use portal_shared::ApiError;

use crate::services::ErrorReporter;
use crate::stores::set_last_error;

/// Banner text for a failed request. Rejected credentials get a sign-in hint
/// instead of the server's wording.
pub fn banner_message(error: &ApiError) -> String {
    if error.is_unauthorized() {
        "Your session has expired. Please sign in again.".to_string()
    } else {
        error.user_message()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn handle_error(&self, error: &ApiError) {
        crate::log_error!("request failed: {}", error);
        set_last_error(banner_message(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_session_asks_to_sign_in_again() {
        let err = ApiError::Http {
            status: 401,
            body: r#"{"title":"Unauthorized","detail":"token expired"}"#.into(),
        };
        assert_eq!(banner_message(&err), "Your session has expired. Please sign in again.");
    }

    #[test]
    fn other_failures_use_the_server_detail() {
        let err = ApiError::Http {
            status: 500,
            body: r#"{"title":"Internal Server Error","detail":"database unavailable"}"#.into(),
        };
        assert_eq!(banner_message(&err), "database unavailable");
        assert_eq!(
            banner_message(&ApiError::Network("connection reset".into())),
            "Network error: connection reset"
        );
    }
}
