use crate::error::Result;
use crate::status::Status;
use serde_json::Value;
use tracing::debug;

/// A single JSend response.
///
/// `data` is kept as an explicit optional value: `None` means absent, and a
/// JSON `null` handed to any constructor or setter is stored as `None`.
/// Present values are kept verbatim, including empty arrays and objects.
///
/// `message` and `code` only exist on error envelopes. Success and fail
/// envelopes never hold them, and an error envelope always holds a message
/// (empty when none was given). Every envelope therefore encodes to a
/// document that decodes back to an equal envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    status: Status,
    data: Option<Value>,
    message: Option<String>,
    code: Option<i64>,
}

fn present(data: Option<Value>) -> Option<Value> {
    data.filter(|value| !value.is_null())
}

impl Envelope {
    pub fn new(
        status: Status,
        data: Option<Value>,
        message: Option<String>,
        code: Option<i64>,
    ) -> Self {
        let mut envelope = Self {
            status,
            data: present(data),
            message,
            code,
        };
        envelope.normalize();
        envelope
    }

    /// Like [`Envelope::new`], but takes the status as text and rejects
    /// anything outside `success`, `fail` and `error`.
    pub fn try_new(
        status: &str,
        data: Option<Value>,
        message: Option<String>,
        code: Option<i64>,
    ) -> Result<Self> {
        Ok(Self::new(status.parse()?, data, message, code))
    }

    pub fn success(data: impl Into<Option<Value>>) -> Self {
        Self::new(Status::Success, data.into(), None, None)
    }

    pub fn fail(data: impl Into<Option<Value>>) -> Self {
        Self::new(Status::Fail, data.into(), None, None)
    }

    pub fn error(
        message: impl Into<String>,
        code: impl Into<Option<i64>>,
        data: impl Into<Option<Value>>,
    ) -> Self {
        Self::new(
            Status::Error,
            data.into(),
            Some(message.into()),
            code.into(),
        )
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Switching away from `error` drops message and code; switching to
    /// `error` starts from an empty message.
    pub fn set_status(&mut self, status: Status) -> &mut Self {
        self.status = status;
        self.normalize();
        self
    }

    /// Sets the status from text. On an unknown status the envelope is left
    /// untouched.
    pub fn try_set_status(&mut self, status: &str) -> Result<&mut Self> {
        let status = status.parse()?;
        Ok(self.set_status(status))
    }

    /// Replaces the payload. `None` (or JSON `null`) clears it.
    pub fn set_data(&mut self, data: impl Into<Option<Value>>) -> &mut Self {
        self.data = present(data.into());
        self
    }

    /// Ignored unless the envelope is an error.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        if self.is_error() {
            self.message = Some(message.into());
        } else {
            debug!(status = %self.status, "message ignored on non-error envelope");
        }
        self
    }

    /// Resets the message to empty on an error envelope.
    pub fn clear_message(&mut self) -> &mut Self {
        self.message = None;
        self.normalize();
        self
    }

    /// Ignored unless the envelope is an error. `None` clears the code.
    pub fn set_code(&mut self, code: impl Into<Option<i64>>) -> &mut Self {
        let code = code.into();
        if self.is_error() {
            self.code = code;
        } else if code.is_some() {
            debug!(status = %self.status, "code ignored on non-error envelope");
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_fail(&self) -> bool {
        self.status == Status::Fail
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    pub fn into_parts(self) -> (Status, Option<Value>, Option<String>, Option<i64>) {
        (self.status, self.data, self.message, self.code)
    }

    fn normalize(&mut self) {
        if self.is_error() {
            self.message.get_or_insert_with(String::new);
        } else {
            self.message = None;
            self.code = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JSendError;
    use serde_json::json;

    #[test]
    fn test_factories_match_explicit_construction() {
        let data = json!({"post": {"id": 1, "name": "test"}});

        assert_eq!(
            Envelope::success(data.clone()),
            Envelope::new(Status::Success, Some(data.clone()), None, None)
        );
        assert_eq!(
            Envelope::fail(json!([])),
            Envelope::new(Status::Fail, Some(json!([])), None, None)
        );
        assert_eq!(
            Envelope::error("Internal Server error.", 500, data.clone()),
            Envelope::new(
                Status::Error,
                Some(data),
                Some("Internal Server error.".to_string()),
                Some(500)
            )
        );
    }

    #[test]
    fn test_null_data_is_stored_as_absent() {
        assert_eq!(Envelope::success(Value::Null).data(), None);
        assert_eq!(Envelope::success(Value::Null), Envelope::success(None));
    }

    #[test]
    fn test_try_new_rejects_unknown_status() {
        let err = Envelope::try_new("pending", None, None, None).unwrap_err();
        assert!(matches!(err, JSendError::InvalidStatus(ref v) if v == "pending"));
    }

    #[test]
    fn test_try_set_status_keeps_previous_status_on_failure() {
        let mut envelope = Envelope::fail(json!({"title": "required"}));
        assert!(envelope.try_set_status("done").is_err());
        assert_eq!(envelope.status(), Status::Fail);

        envelope.try_set_status("success").unwrap();
        assert!(envelope.is_success());
    }

    #[test]
    fn test_setters_chain() {
        let mut envelope = Envelope::success(None);
        envelope
            .set_status(Status::Error)
            .set_message("Service unavailable")
            .set_code(503)
            .set_data(json!({"retry_after": 30}));

        assert!(envelope.is_error());
        assert_eq!(envelope.message(), Some("Service unavailable"));
        assert_eq!(envelope.code(), Some(503));
        assert_eq!(envelope.data(), Some(&json!({"retry_after": 30})));
    }

    #[test]
    fn test_resetting_optional_fields() {
        let mut envelope = Envelope::error("Gone", 410, json!(["a"]));
        envelope.set_data(None).set_code(None).clear_message();

        assert_eq!(envelope.data(), None);
        assert_eq!(envelope.code(), None);
        assert_eq!(envelope.message(), Some(""));
    }

    #[test]
    fn test_message_and_code_only_exist_on_error_envelopes() {
        let mut envelope = Envelope::success(json!({"id": 1}));
        envelope.set_message("note").set_code(7);
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.code(), None);

        let built = Envelope::new(Status::Fail, None, Some("note".to_string()), Some(7));
        assert_eq!(built, Envelope::fail(None));
    }

    #[test]
    fn test_leaving_error_status_drops_message_and_code() {
        let mut envelope = Envelope::error("Gone", 410, None);
        envelope.set_status(Status::Success);
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.code(), None);

        envelope.set_status(Status::Error);
        assert_eq!(envelope.message(), Some(""));
        assert_eq!(envelope.code(), None);
    }

    #[test]
    fn test_error_without_message_gets_empty_message() {
        let envelope = Envelope::new(Status::Error, None, None, None);
        assert_eq!(envelope.message(), Some(""));
    }

    #[test]
    fn test_predicates_are_exclusive() {
        for status in Status::ALL {
            let envelope = Envelope::new(status, None, None, None);
            let hits = [envelope.is_success(), envelope.is_fail(), envelope.is_error()]
                .iter()
                .filter(|hit| **hit)
                .count();
            assert_eq!(hits, 1, "status {status}");
        }
    }
}
