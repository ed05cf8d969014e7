//! Client tests against a scripted HTTP backend on a local socket.

use client_blockchain_core::{
    AdvanceRoom, IdentityError, IdentityService, LedgerError, LedgerReader, LedgerWriter,
    PlayerAccount, WalletInfo,
};
use client_blockchain_starknet::{StarknetBackendClient, StarknetConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Recorded request: request line plus body.
#[derive(Debug)]
struct Recorded {
    request_line: String,
    body: String,
}

/// Serves one scripted `(status, body)` per connection, in order.
async fn scripted_backend(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut recorded = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            recorded.push(read_request(&mut socket).await);

            let reply = format!(
                "HTTP/1.1 {status} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        recorded
    });

    (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(split) = text.find("\r\n\r\n") {
            let head = &text[..split];
            let length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let body = &text[split + 4..];
            if body.len() >= length || n == 0 {
                return Recorded {
                    request_line: head.lines().next().unwrap_or_default().to_string(),
                    body: body.to_string(),
                };
            }
        }
        if n == 0 {
            panic!("connection closed before request completed");
        }
    }
}

fn account() -> PlayerAccount {
    PlayerAccount {
        user_id: "user-42".into(),
        wallet: WalletInfo {
            address: "0xaaa".into(),
            pk: "hashed-key".into(),
            vivi: "0xbbb".into(),
        },
    }
}

#[tokio::test]
async fn login_returns_wallet_mapping() {
    let (url, backend) = scripted_backend(vec![(
        200,
        r#"{"success":true,"user":{"id":"user-42"},"wallet":{"address":"0xaaa","pk":"hashed-key","vivi":"0xbbb"}}"#,
    )])
    .await;
    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();

    let session = client.log_in("vivi@example.com", "secret").await.unwrap();
    assert_eq!(session.account(), Some(account()));

    let recorded = backend.await.unwrap();
    assert!(recorded[0].request_line.starts_with("POST /api/auth"));
    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body["mode"], "login");
    assert_eq!(body["email"], "vivi@example.com");
}

#[tokio::test]
async fn bad_credentials_surface_backend_message() {
    let (url, _backend) = scripted_backend(vec![(
        400,
        r#"{"success":false,"error":"Invalid login credentials"}"#,
    )])
    .await;
    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();

    assert_eq!(
        client.log_in("vivi@example.com", "wrong").await,
        Err(IdentityError::InvalidCredentials(
            "Invalid login credentials".into()
        ))
    );
}

#[tokio::test]
async fn read_state_queries_by_user_id() {
    let (url, backend) = scripted_backend(vec![(
        200,
        r#"{"success":true,"vivi":{"healthPoints":8,"room":3,"owner":"0xaaa","contractAddress":"0xbbb"}}"#,
    )])
    .await;
    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();

    let vivi = client.read_state(&account()).await.unwrap();
    assert_eq!((vivi.health_points, vivi.room), (8, 3));

    let recorded = backend.await.unwrap();
    assert!(recorded[0].request_line.starts_with("GET /api/vivi?uid=user-42"));
}

#[tokio::test]
async fn missing_wallet_is_not_found() {
    let (url, _backend) =
        scripted_backend(vec![(404, r#"{"success":false,"error":"Wallet not found"}"#)]).await;
    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();

    assert_eq!(
        client.read_state(&account()).await,
        Err(LedgerError::NotFound("0xbbb".into()))
    );
}

#[tokio::test]
async fn advance_room_posts_next_room_call() {
    let (url, backend) = scripted_backend(vec![
        (200, r#"{"result":{"transactionHash":"0xfeed"}}"#),
        (400, r#"{"error":"Missing required fields"}"#),
        (500, r#"{"error":"External call failed: timeout"}"#),
    ])
    .await;
    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();

    let tx = client.advance_room(&account(), AdvanceRoom::new(2)).await.unwrap();
    assert_eq!(tx.as_str(), "0xfeed");

    let rejected = client.advance_room(&account(), AdvanceRoom::new(2)).await.unwrap_err();
    assert!(matches!(rejected, LedgerError::Rejected(_)));
    assert!(!rejected.is_ambiguous());

    let unknown = client.advance_room(&account(), AdvanceRoom::new(2)).await.unwrap_err();
    assert!(unknown.is_ambiguous());

    let recorded = backend.await.unwrap();
    assert!(recorded[0].request_line.starts_with("POST /api/external"));
    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body["network"], "sepolia");
    assert_eq!(body["hashedPk"], "hashed-key");
    assert_eq!(body["calls"][0]["entrypoint"], "next_room");
    assert_eq!(body["calls"][0]["calldata"], serde_json::json!(["2", "0"]));
}

#[tokio::test]
async fn unreachable_backend_is_not_ambiguous() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = StarknetBackendClient::new(StarknetConfig::new(url)).unwrap();
    let err = client.advance_room(&account(), AdvanceRoom::new(0)).await.unwrap_err();
    assert!(!err.is_ambiguous(), "unexpected {err:?}");
}
