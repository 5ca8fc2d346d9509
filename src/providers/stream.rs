// Draining a streamed reply into one string

use anyhow::Result;
use tokio::sync::mpsc::Receiver;

use super::StreamChunk;
use crate::errors::BuddyError;

/// Concatenate fragments in arrival order until `Done`.
///
/// Each fragment is also handed to `on_fragment` for incremental display.
/// A failed item, or a channel that closes before `Done`, is an error and
/// the partial text is dropped.
pub async fn collect_stream<F>(mut rx: Receiver<Result<StreamChunk>>, mut on_fragment: F) -> Result<String>
where
    F: FnMut(&str),
{
    let mut reply = String::new();

    while let Some(item) = rx.recv().await {
        match item? {
            StreamChunk::TextDelta(text) => {
                on_fragment(&text);
                reply.push_str(&text);
            }
            StreamChunk::Done { finish_reason } => {
                tracing::debug!(?finish_reason, chars = reply.len(), "Stream complete");
                return Ok(reply);
            }
        }
    }

    Err(BuddyError::StreamInterrupted.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_collects_in_order() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(StreamChunk::TextDelta("Hello".into()))).await.unwrap();
        tx.send(Ok(StreamChunk::TextDelta(", ".into()))).await.unwrap();
        tx.send(Ok(StreamChunk::TextDelta("friend".into()))).await.unwrap();
        tx.send(Ok(StreamChunk::Done { finish_reason: Some("stop".into()) }))
            .await
            .unwrap();

        let mut seen = Vec::new();
        let reply = collect_stream(rx, |f| seen.push(f.to_string())).await.unwrap();
        assert_eq!(reply, "Hello, friend");
        assert_eq!(seen, vec!["Hello", ", ", "friend"]);
    }

    #[tokio::test]
    async fn test_mid_stream_error() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(StreamChunk::TextDelta("partial".into()))).await.unwrap();
        tx.send(Err(anyhow::anyhow!("connection reset"))).await.unwrap();

        let result = collect_stream(rx, |_| {}).await;
        assert!(result.unwrap_err().to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_closed_without_done() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(StreamChunk::TextDelta("cut off".into()))).await.unwrap();
        drop(tx);

        let err = collect_stream(rx, |_| {}).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuddyError>(),
            Some(BuddyError::StreamInterrupted)
        ));
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(StreamChunk::Done { finish_reason: None })).await.unwrap();

        assert_eq!(collect_stream(rx, |_| {}).await.unwrap(), "");
    }
}
