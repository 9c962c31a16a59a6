// 📥 Body Reader - Incremental read with a hard byte cap
//
// Produces either the complete body or an explicit failure before any JSON
// parsing happens.

use axum::body::Body;
use futures::StreamExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BodyError {
    /// The body grew past the cap; reading stopped at that point
    #[error("Request body too large")]
    TooLarge { limit: usize },

    /// The client went away or the transport failed mid-read
    #[error("{0}")]
    Stream(#[from] axum::Error),
}

/// Read the whole body, failing as soon as more than `limit` bytes arrive
pub async fn read_body_limited(body: Body, limit: usize) -> Result<Vec<u8>, BodyError> {
    let mut stream = body.into_data_stream();
    let mut buffer = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        buffer.extend_from_slice(&chunk);

        if buffer.len() > limit {
            return Err(BodyError::TooLarge { limit });
        }
    }

    Ok(buffer)
}

// ============================================================================
// TESTS
// ============================================================================
