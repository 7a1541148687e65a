//! Client error types.

use derive_more::{Display, Error, From};

/// Failure outside the server's normal response contract.
///
/// Domain rejections and unexpected statuses are ordinary
/// [`ActionOutcome`](crate::ActionOutcome) values, not errors. This type
/// covers the cases where no routable response exists at all: the request
/// never completed, or a success response carried an unreadable body.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// The request never produced a response.
    #[display("transport failure: {source}")]
    Transport {
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// A success response carried a body that is not a snapshot.
    #[display("malformed snapshot payload: {source}")]
    Payload {
        /// Underlying decode error.
        source: serde_json::Error,
    },
}
