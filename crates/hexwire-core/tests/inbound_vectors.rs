//! Decode + validate vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hexwire_core::protocol::{decode, Inbound};

use vector_loader::load;

#[test]
fn inbound_vectors() {
    let files = [
        "connection_successful.json",
        "connection_missing_player_id.json",
        "connection_player_id_number.json",
        "lobby_created.json",
        "lobby_created_missing_lobby.json",
        "lobby_id_number.json",
        "board_json.json",
        "place_road_echo.json",
        "place_settlement_no_message.json",
        "not_json.json",
        "missing_type.json",
        "unknown_type.json",
        "lobby_updated.json",
        "server_error.json",
    ];

    for f in files {
        let v = load(f);
        let res = decode(v.frame.text()).and_then(Inbound::from_envelope);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let inbound = res.expect("expected ok inbound");
        let ex = v.expect.expect("missing expect block");

        match ex["kind"].as_str().unwrap() {
            "connection_successful" => {
                let Inbound::ConnectionSuccessful { player_id } = inbound else {
                    panic!("vector={}: unexpected event", v.description);
                };
                assert_eq!(
                    player_id,
                    ex["player_id"].as_str().unwrap(),
                    "vector={}",
                    v.description
                );
            }
            "lobby_created" => {
                let Inbound::LobbyCreated { lobby_id } = inbound else {
                    panic!("vector={}: unexpected event", v.description);
                };
                assert_eq!(lobby_id, ex["lobby_id"].as_str().unwrap(), "vector={}", v.description);
            }
            "board_update" => {
                let Inbound::BoardUpdate { msg_type, lobby_id, board } = inbound else {
                    panic!("vector={}: unexpected event", v.description);
                };
                assert_eq!(
                    msg_type.as_str(),
                    ex["msg_type"].as_str().unwrap(),
                    "vector={}",
                    v.description
                );
                assert_eq!(lobby_id, ex["lobby_id"].as_str().unwrap(), "vector={}", v.description);
                assert_eq!(board, ex["board"], "vector={}", v.description);
            }
            "server_error" => {
                assert!(
                    matches!(inbound, Inbound::ServerError { .. }),
                    "vector={}",
                    v.description
                );
            }
            "unwired" => {
                let Inbound::Unwired(msg_type) = inbound else {
                    panic!("vector={}: unexpected event", v.description);
                };
                assert_eq!(
                    msg_type.as_str(),
                    ex["msg_type"].as_str().unwrap(),
                    "vector={}",
                    v.description
                );
            }
            other => panic!("unknown expect kind: {other}"),
        }
    }
}
