//! The `/ws/suggest` socket: message shapes and a framed round trip.
mod helpers;

use actix_web::dev;
use actix_web::error::PayloadError;
use actix_web::http::{StatusCode, header};
use actix_web::web::Bytes;
use actix_web::{App, FromRequest, HttpResponse, test, web};
use futures_util::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use helpers::MockApi;
use skillbridge_web::config::{Environment, SuggestConfig};
use skillbridge_web::handlers;
use skillbridge_web::live::protocol::{ClientMessage, ServerMessage};
use skillbridge_web::live::session::run_suggest_session;
use skillbridge_web::models::suggestions::{Suggestion, SuggestionKind};
use skillbridge_web::search::suggest::{DropdownView, Key, SuggestionDriver, UiEvent, Update};

fn event(json: &str) -> UiEvent {
    serde_json::from_str::<ClientMessage>(json).unwrap().into()
}

#[::core::prelude::v1::test]
fn test_client_messages() {
    assert_eq!(
        event(r#"{"type":"input","value":"webs"}"#),
        UiEvent::Input("webs".to_string())
    );
    assert_eq!(event(r#"{"type":"key","key":"ArrowDown"}"#), UiEvent::Key(Key::ArrowDown));
    assert_eq!(event(r#"{"type":"key","key":"Escape"}"#), UiEvent::Key(Key::Escape));
    assert_eq!(event(r#"{"type":"select","index":2}"#), UiEvent::Select(2));
    assert_eq!(event(r#"{"type":"dismiss"}"#), UiEvent::Dismiss);

    assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"key","key":"Tab"}"#).is_err());
    assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"scroll"}"#).is_err());
}

#[::core::prelude::v1::test]
fn test_server_messages() {
    let json = |update: Update| serde_json::to_value(ServerMessage::from(update)).unwrap();

    assert_eq!(
        json(Update::Navigate("/search?q=webs".to_string())),
        serde_json::json!({ "type": "navigate", "url": "/search?q=webs" })
    );
    assert_eq!(
        json(Update::View(DropdownView::Hidden)),
        serde_json::json!({ "type": "closed" })
    );

    let shown = json(Update::View(DropdownView::Suggestions {
        query: "webs".to_string(),
        items: vec![Suggestion {
            text: "website".to_string(),
            kind: SuggestionKind::Tag,
            category: None,
            count: None,
        }],
        highlighted: Some(0),
    }));
    assert_eq!(shown["type"], "suggestions");
    assert_eq!(shown["highlighted"], 0);
    assert_eq!(shown["items"][0], serde_json::json!({ "text": "website", "type": "tag" }));

    let unavailable = json(Update::View(DropdownView::Unavailable {
        query: "webs".to_string(),
        message: "Suggestions are unavailable right now".to_string(),
    }));
    assert_eq!(unavailable["type"], "unavailable");
    assert_eq!(unavailable["query"], "webs");
}

fn suggestion_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/search/suggestions",
        web::get().to(|| async {
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "suggestions": [
                    { "text": "website redesign", "type": "gig" },
                    { "text": "Website Development", "type": "category" }
                ]
            }))
        }),
    );
}

fn upgrade(req: test::TestRequest) -> test::TestRequest {
    req.insert_header((header::UPGRADE, "websocket"))
        .insert_header((header::CONNECTION, "Upgrade"))
        .insert_header((header::SEC_WEBSOCKET_VERSION, "13"))
        .insert_header((header::SEC_WEBSOCKET_KEY, "dGhlIHNhbXBsZSBub25jZQ=="))
}

#[actix_web::test]
async fn test_upgrade_handshake() {
    let mock = MockApi::start(suggestion_routes);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(mock.state(Environment::Production)))
            .configure(handlers::init_routes),
    )
    .await;

    let req = upgrade(test::TestRequest::get().uri("/ws/suggest")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SWITCHING_PROTOCOLS);

    let req = test::TestRequest::get().uri("/ws/suggest").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

/// A masked client frame. The all-zero mask leaves the payload as is.
fn client_frame(opcode: u8, payload: &[u8]) -> Bytes {
    let mut frame = vec![0x80 | opcode];
    if payload.len() < 126 {
        frame.push(0x80 | payload.len() as u8);
    } else {
        frame.push(0x80 | 126);
        frame.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    }
    frame.extend_from_slice(&[0, 0, 0, 0]);
    frame.extend_from_slice(payload);
    Bytes::from(frame)
}

fn text(json: serde_json::Value) -> Bytes {
    client_frame(0x1, json.to_string().as_bytes())
}

/// Split unmasked server frames into `(opcode, payload)`.
fn server_frames(mut bytes: &[u8]) -> Vec<(u8, Vec<u8>)> {
    let mut frames = Vec::new();
    while bytes.len() >= 2 {
        let opcode = bytes[0] & 0x0F;
        let (len, header) = match bytes[1] & 0x7F {
            126 => (u16::from_be_bytes([bytes[2], bytes[3]]) as usize, 4),
            127 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[2..10]);
                (u64::from_be_bytes(raw) as usize, 10)
            }
            n => (n as usize, 2),
        };
        frames.push((opcode, bytes[header..header + len].to_vec()));
        bytes = &bytes[header + len..];
    }
    frames
}

#[actix_web::test]
async fn test_socket_round_trip_and_teardown() {
    let mock = MockApi::start(suggestion_routes);

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Bytes>();
    let incoming = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok::<_, PayloadError>(chunk), rx))
    });
    let incoming: Pin<Box<dyn Stream<Item = Result<Bytes, PayloadError>>>> = Box::pin(incoming);
    let mut payload = dev::Payload::Stream { payload: incoming };

    let (req, _) = upgrade(test::TestRequest::get().uri("/ws/suggest")).to_http_parts();
    let body = web::Payload::from_request(&req, &mut payload).await.unwrap();
    let (response, session, msg_stream) = actix_ws::handle(&req, body).unwrap();

    let config = SuggestConfig {
        debounce: Duration::from_millis(20),
        ..SuggestConfig::default()
    };
    let driver = SuggestionDriver::new(Arc::new(mock.client()), config);
    actix_web::rt::spawn(run_suggest_session(session, msg_stream, driver));

    actix_web::rt::spawn(async move {
        tx.send(text(serde_json::json!({ "type": "input", "value": "w" }))).unwrap();
        tx.send(text(serde_json::json!({ "type": "input", "value": "webs" }))).unwrap();
        actix_web::rt::time::sleep(Duration::from_millis(500)).await;
        tx.send(text(serde_json::json!({ "type": "key", "key": "ArrowDown" }))).unwrap();
        tx.send(client_frame(0x1, b"not json")).unwrap();
        tx.send(text(serde_json::json!({ "type": "key", "key": "Enter" }))).unwrap();
        tx.send(client_frame(0x8, &[])).unwrap();
    });

    let bytes = actix_web::rt::time::timeout(
        Duration::from_secs(5),
        actix_web::body::to_bytes(response.into_body()),
    )
    .await
    .expect("the session should end after the close frame")
    .unwrap();

    let frames = server_frames(&bytes);
    let replies: Vec<serde_json::Value> = frames
        .iter()
        .filter(|(opcode, _)| *opcode == 0x1)
        .map(|(_, payload)| serde_json::from_slice(payload).unwrap())
        .collect();

    let kinds: Vec<&str> = replies.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["closed", "suggestions", "suggestions", "error", "navigate"]
    );
    assert_eq!(replies[1]["query"], "webs");
    assert!(replies[1]["highlighted"].is_null());
    assert_eq!(replies[2]["highlighted"], 0);
    assert_eq!(replies[4]["url"], "/search?q=website+redesign");
    assert_eq!(frames.last().map(|(opcode, _)| *opcode), Some(0x8));

    let fetched = mock.requests_to("/api/search/suggestions");
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].param("q").as_deref(), Some("webs"));
}
