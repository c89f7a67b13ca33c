// Connection handling module
use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::{tungstenite::protocol::Message, WebSocketStream};

use super::{messages::StatusRequest, StatusLink};

/// Sends the subscription request, then feeds text frames to the link until
/// the stream ends. The link only counts as open once the request is out.
/// Transport errors are returned to the caller.
pub async fn drive<S>(
    mut ws: WebSocketStream<S>,
    link: &mut StatusLink,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = StatusRequest::GetPlaylistStatus.to_json()?;
    ws.send(Message::Text(request)).await?;
    link.on_open().await;

    while let Some(msg) = ws.next().await {
        match msg? {
            Message::Text(text) => {
                link.on_message(&text).await;
            }
            Message::Binary(data) => debug!("Ignoring binary frame of {} bytes", data.len()),
            // The close reply is sent by tungstenite; the stream ends after it
            Message::Close(frame) => info!("Server closed the connection: {:?}", frame),
            _ => {}
        }
    }

    Ok(())
}
