#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("category {0:?} has no selector usable by this provider")]
    Selector(&'static str),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else {
            UpstreamError::Transport(e)
        }
    }
}

impl UpstreamError {
    /// Build a `Status` error, keeping at most 200 bytes of the body.
    pub fn status(status: u16, body: &str) -> Self {
        let mut end = body.len().min(200);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        UpstreamError::Status {
            status,
            body: body[..end].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_is_truncated() {
        let body = "é".repeat(150);
        match UpstreamError::status(401, &body) {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body.len(), 200);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
