//! Inbound dispatch: one handler call, one error report, or nothing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hexwire_client::transport::ConnectionListener;
use hexwire_core::error::ErrorCode;
use hexwire_core::HexwireError;

use recorder::{HandlerMode, Recorder};

#[test]
fn connection_successful_calls_handler_once() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.dispatch(r#"{"type":"CONNECTION_SUCCESSFUL","message":{"playerId":"p1"}}"#);

    assert_eq!(rec.calls(), vec!["connection_success(p1)"]);
    assert!(rec.error_codes().is_empty());
}

#[test]
fn connection_successful_without_player_id_is_invalid_payload() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.dispatch(r#"{"type":"CONNECTION_SUCCESSFUL","message":{"other":"x"}}"#);

    assert!(rec.calls().is_empty());
    assert_eq!(rec.error_codes(), vec![ErrorCode::InvalidPayload]);
}

#[test]
fn empty_player_id_is_invalid_payload() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"CONNECTION_SUCCESSFUL","message":{"playerId":""}}"#);

    assert!(rec.calls().is_empty());
    assert_eq!(rec.error_codes(), vec![ErrorCode::InvalidPayload]);
}

#[test]
fn lobby_created_calls_handler() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"LOBBY_CREATED","lobbyId":"L1"}"#);

    assert_eq!(rec.calls(), vec!["lobby_created(L1)"]);
    assert!(rec.error_codes().is_empty());
}

#[test]
fn board_tags_share_one_handler() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.dispatch(r#"{"type":"GAME_BOARD_JSON","lobbyId":"L1","message":{"tiles":[]}}"#);
    d.dispatch(r#"{"type":"PLACE_SETTLEMENT","lobbyId":"L1","player":"p2","message":{"settlements":[7]}}"#);
    d.dispatch(r#"{"type":"PLACE_ROAD","lobbyId":"L2","message":{"roads":[]}}"#);

    assert_eq!(
        rec.calls(),
        vec![
            r#"board_received(L1, {"tiles":[]})"#,
            r#"board_received(L1, {"settlements":[7]})"#,
            r#"board_received(L2, {"roads":[]})"#,
        ]
    );
    assert!(rec.error_codes().is_empty());
}

#[test]
fn board_without_lobby_or_message_is_invalid_payload() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.dispatch(r#"{"type":"GAME_BOARD_JSON","message":{"tiles":[]}}"#);
    d.dispatch(r#"{"type":"GAME_BOARD_JSON","lobbyId":"L1"}"#);
    d.dispatch(r#"{"type":"PLACE_ROAD","lobbyId":"L1","message":[1,2]}"#);

    assert!(rec.calls().is_empty());
    assert_eq!(
        rec.error_codes(),
        vec![
            ErrorCode::InvalidPayload,
            ErrorCode::InvalidPayload,
            ErrorCode::InvalidPayload
        ]
    );
}

#[test]
fn malformed_text_reports_once_and_calls_nothing() {
    for text in ["not json", "{", "[1,2]", r#"{"lobbyId":"L1"}"#, r#"{"type":null}"#] {
        let rec = Recorder::new(HandlerMode::Ok);
        rec.dispatcher().dispatch(text);

        assert!(rec.calls().is_empty(), "text={text:?}");
        assert_eq!(rec.error_codes(), vec![ErrorCode::MalformedEnvelope], "text={text:?}");
    }
}

#[test]
fn unknown_type_is_silently_ignored() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"UNHANDLED_MESSAGE"}"#);

    assert!(rec.calls().is_empty());
    assert!(rec.error_codes().is_empty());
}

#[test]
fn known_unwired_types_are_silently_ignored() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.dispatch(r#"{"type":"LOBBY_UPDATED","lobbyId":"L1","players":["p1","p2"]}"#);
    d.dispatch(r#"{"type":"DICE_RESULT","player":"p1","message":{"dice":[3,4]}}"#);
    d.dispatch(r#"{"type":"GAME_WON","player":"p1"}"#);
    d.dispatch(r#"{"type":"ROLL_DICE"}"#);

    assert!(rec.calls().is_empty());
    assert!(rec.error_codes().is_empty());
}

#[test]
fn unwired_type_with_odd_optional_fields_is_ignored() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"LOBBY_UPDATED","players":[{"id":"p1"}]}"#);

    assert!(rec.calls().is_empty());
    assert!(rec.error_codes().is_empty());
}

#[test]
fn mistyped_field_a_handler_does_not_need_is_tolerated() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"LOBBY_CREATED","lobbyId":"L1","player":7}"#);

    assert_eq!(rec.calls(), vec!["lobby_created(L1)"]);
    assert!(rec.error_codes().is_empty());
}

#[test]
fn mistyped_required_lobby_id_is_invalid_payload() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"LOBBY_CREATED","lobbyId":7}"#);

    assert!(rec.calls().is_empty());
    assert_eq!(rec.error_codes(), vec![ErrorCode::InvalidPayload]);
}

#[test]
fn server_error_is_not_forwarded() {
    let rec = Recorder::new(HandlerMode::Ok);
    rec.dispatcher().dispatch(r#"{"type":"ERROR","message":{"reason":"not your turn"}}"#);

    assert!(rec.calls().is_empty());
    assert!(rec.error_codes().is_empty());
}

#[test]
fn handler_error_is_reported_with_cause() {
    let rec = Recorder::new(HandlerMode::Fail);
    rec.dispatcher().dispatch(r#"{"type":"LOBBY_CREATED","lobbyId":"L1"}"#);

    assert_eq!(rec.calls(), vec!["lobby_created(L1)"]);
    let errors = rec.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        HexwireError::HandlerFailure { tag, source } => {
            assert_eq!(*tag, "LOBBY_CREATED");
            assert_eq!(source.to_string(), "rejected lobby_created(L1)");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn handler_panic_does_not_escape_dispatch() {
    let rec = Recorder::new(HandlerMode::Panic);
    rec.dispatcher().dispatch(r#"{"type":"CONNECTION_SUCCESSFUL","message":{"playerId":"p1"}}"#);

    assert_eq!(rec.calls(), vec!["connection_success(p1)"]);
    let errors = rec.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::HandlerFailure);
    assert!(errors[0].to_string().contains("boom in connection_success(p1)"));
}

#[test]
fn lifecycle_events_reach_the_right_sinks() {
    let rec = Recorder::new(HandlerMode::Ok);
    let d = rec.dispatcher();

    d.on_open();
    d.on_closing(1001, "going away");
    d.on_message(r#"{"type":"LOBBY_CREATED","lobbyId":"L3"}"#);
    d.on_failure(HexwireError::transport("connection reset"));
    d.on_closed(1000, "bye");

    assert_eq!(rec.calls(), vec!["lobby_created(L3)"]);
    assert_eq!(rec.error_codes(), vec![ErrorCode::Transport]);
    assert_eq!(*rec.closed.lock().unwrap(), vec![(1000, "bye".to_string())]);
}
