use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::live::session::run_suggest_session;
use crate::search::suggest::SuggestionDriver;
use crate::state::AppState;

/// GET /ws/suggest
///
/// Upgrades to a WebSocket carrying the live autocomplete of one search box.
/// Keystrokes come in as `{"type":"input","value":".."}`; dropdown changes
/// and navigation targets go out as they happen.
pub async fn ws_suggest(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let driver = SuggestionDriver::new(Arc::clone(&state.api), state.config.suggest.clone());
    actix_web::rt::spawn(run_suggest_session(session, msg_stream, driver));

    Ok(response)
}
