//! # JSend
//!
//! A value object for the [JSend](https://github.com/omniti-labs/jsend)
//! response convention: every response is `success`, `fail` or `error`, and
//! each status has its own required keys.
//!
//! ## Basic Usage
//!
//! ```rust
//! use jsend::*;
//! use serde_json::json;
//!
//! let envelope = Envelope::success(json!({"post": {"id": 1, "name": "test"}}));
//! assert_eq!(
//!     envelope.encode(),
//!     r#"{"status":"success","data":{"post":{"id":1,"name":"test"}}}"#
//! );
//!
//! let decoded = Envelope::decode(&envelope.encode()).expect("Valid JSend");
//! assert_eq!(decoded, envelope);
//! ```
//!
//! ## Errors
//!
//! Error envelopes carry a message and, optionally, a numeric code and data.
//! Both are left out of the encoding when absent:
//!
//! ```rust
//! use jsend::*;
//!
//! let mut envelope = Envelope::error("Internal Server error.", 500, None);
//! assert_eq!(
//!     envelope.encode(),
//!     r#"{"status":"error","message":"Internal Server error.","code":500}"#
//! );
//!
//! envelope.set_code(None);
//! assert!(envelope.validate().is_ok());
//! ```
//!
//! ## Decoding untrusted input
//!
//! ```rust
//! use jsend::*;
//!
//! let err = Envelope::decode(r#"{"status":"success"}"#).unwrap_err();
//! assert!(matches!(err, JSendError::MissingData { status: Status::Success }));
//! assert!(err.is_client_error());
//! ```

mod codec;
mod envelope;
mod error;
mod send;
mod status;
mod validation;

pub use codec::*;
pub use envelope::*;
pub use error::JSendError;
pub use send::*;
pub use status::*;
pub use validation::*;
