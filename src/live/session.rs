use actix_ws::Message;
use futures_util::StreamExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::live::protocol::{ClientMessage, ServerMessage};
use crate::search::suggest::{SuggestionDriver, SuggestionSource};

/// Drives one suggestion socket: feeds client events into the driver and
/// pushes every dropdown change back. The driver, with its pending timer, is
/// dropped when the socket closes.
pub async fn run_suggest_session<S: SuggestionSource>(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut driver: SuggestionDriver<S>,
) {
    let session_id = Uuid::new_v4();
    info!("Suggestion session {session_id} opened");

    loop {
        tokio::select! {
            // Incoming event from the search box.
            msg = msg_stream.next() => {
                let Some(msg) = msg else { break };
                match msg {
                    Ok(Message::Text(text)) => {
                        let reply = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(event) => driver.handle(event.into()).map(ServerMessage::from),
                            Err(e) => Some(ServerMessage::Error {
                                message: format!("Invalid message format: {e}"),
                            }),
                        };
                        if let Some(reply) = reply {
                            if send(&mut session, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Timer fired or a suggestion request came back.
            update = driver.next_update() => {
                if send(&mut session, &ServerMessage::from(update)).await.is_err() {
                    break;
                }
            }
        }
    }

    debug!(
        "Suggestion session {session_id} closing after {} requests",
        driver.machine().issued()
    );
    let _ = session.close(None).await;
}

async fn send(session: &mut actix_ws::Session, msg: &ServerMessage) -> Result<(), actix_ws::Closed> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    session.text(json).await
}
