use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Request could not be sent or the response could not be read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The messaging API answered with a non-success status.
    #[error("messaging api rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
