// Chunked JSON streaming of panel updates
use crate::domain::panel::PanelSnapshot;
use crate::infrastructure::http_response::brotli_compress;
use crate::infrastructure::json_mapper::panel_to_dto;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Create a chunked streaming response, one frame per snapshot.
pub fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = PanelSnapshot> + Send + 'static,
{
    let byte_stream = stream.then(move |snapshot| async move { encode_frame(snapshot, compress).await });

    // Frames are compressed one by one, so no Content-Encoding on the response
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Frame layout: 4-byte big-endian payload length, then the JSON payload.
pub async fn encode_frame(snapshot: PanelSnapshot, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(&panel_to_dto(snapshot))?;

    let payload = if compress {
        brotli_compress(&json).await?
    } else {
        json
    };

    let mut frame = BytesMut::with_capacity(4 + payload.len());
    frame.put_u32(payload.len() as u32);
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

/// Current state first, then every update until the client goes away.
pub fn stream_from_receiver(
    initial: Vec<PanelSnapshot>,
    mut rx: broadcast::Receiver<PanelSnapshot>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        for snapshot in initial {
            yield snapshot;
        }
        loop {
            match rx.recv().await {
                Ok(snapshot) => yield snapshot,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Panel stream lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    match chunked_json_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
