use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use zandro_query::models::server::{RESPONSE_ACCEPTED, RESPONSE_BANNED, RESPONSE_DENIED};
use zandro_query::protocol::huffman;
use zandro_query::transport::Transport;
use zandro_query::{
    query, query_default, query_with, ExtendedFlag, ExtendedFlags, FlagSet, GameType, QueryError,
    QueryFlag, QueryFlags, QueryOptions, QueryRequest, ResponseCode, TransportError,
};

fn le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Accepted reply to the default query: one deathmatch player named Foo.
fn deathmatch_reply(flags: u32) -> Vec<u8> {
    let mut plain = Vec::new();
    plain.extend_from_slice(&le(RESPONSE_ACCEPTED));
    plain.extend_from_slice(&le(1_700_000_000));
    plain.extend_from_slice(b"3.0\0");
    plain.extend_from_slice(&le(flags));
    plain.extend_from_slice(b"Test Server\0");
    plain.extend_from_slice(b"MAP01\0");
    plain.extend_from_slice(&[3, 0, 0]);
    plain.push(1);
    plain.extend_from_slice(b"Foo\0");
    plain.extend_from_slice(&5i16.to_le_bytes());
    plain.extend_from_slice(&30u16.to_le_bytes());
    plain.extend_from_slice(&[0, 0, 10]);
    plain
}

/// Answers a single datagram with whatever `reply` builds from the decoded request.
async fn serve_once<F>(reply: F) -> SocketAddr
where
    F: FnOnce(Vec<u8>) -> Option<Vec<u8>> + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        let (len, from) = socket.recv_from(&mut buf).await.unwrap();
        let request = huffman::decode(&buf[..len]).unwrap();
        if let Some(datagram) = reply(request) {
            socket.send_to(&datagram, from).await.unwrap();
        }
        // Keep the socket open until the client gives up.
        tokio::time::sleep(Duration::from_secs(2)).await;
    });
    addr
}

fn request_word(request: &[u8], index: usize) -> u32 {
    u32::from_le_bytes(request[index * 4..index * 4 + 4].try_into().unwrap())
}

#[tokio::test]
async fn default_query_round_trip() {
    let addr = serve_once(|request| {
        assert_eq!(request.len(), 16);
        assert_eq!(request_word(&request, 0), 199);
        assert_eq!(request_word(&request, 3), 0);
        Some(huffman::encode(&deathmatch_reply(request_word(&request, 1))))
    })
    .await;

    let status = query_default(&addr.to_string(), Duration::from_secs(2)).await.unwrap();

    assert_eq!(status.response_code, ResponseCode::Accepted);
    assert_eq!(status.version.as_deref(), Some("3.0"));
    assert_eq!(status.name.as_deref(), Some("Test Server"));
    assert_eq!(status.map_name.as_deref(), Some("MAP01"));
    assert_eq!(status.num_players, Some(1));
    assert_eq!(status.game_type(), Some(GameType::Deathmatch));

    let players = status.players.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Foo");
    assert_eq!(players[0].frags, 5);
    assert_eq!(players[0].ping, 30);
    assert!(!players[0].spectator);
    assert!(!players[0].bot);
    assert_eq!(players[0].team, None);
    assert_eq!(players[0].time_on_server, 10);
}

#[tokio::test]
async fn request_flags_are_normalized_on_the_wire() {
    let addr = serve_once(|request| {
        let flags = request_word(&request, 1);
        assert_eq!(
            flags,
            QueryFlags::combine([QueryFlag::PlayerData, QueryFlag::GameType, QueryFlag::ExtendedInfo]).bits()
        );
        assert_eq!(request_word(&request, 3), 0x2);
        Some(huffman::encode(&le(RESPONSE_BANNED)))
    })
    .await;

    let status = query(
        &addr.to_string(),
        QueryFlags::combine([QueryFlag::PlayerData]),
        ExtendedFlags::combine([ExtendedFlag::Country]),
        Duration::from_secs(2),
    )
    .await
    .unwrap();
    assert_eq!(status.response_code, ResponseCode::Banned);
}

#[tokio::test]
async fn denied_reply_is_not_an_error() {
    let addr = serve_once(|_| Some(huffman::encode(&le(RESPONSE_DENIED)))).await;

    let status = query_default(&addr.to_string(), Duration::from_secs(2)).await.unwrap();
    assert_eq!(status.response_code, ResponseCode::Denied);
    assert!(status.name.is_none());
    assert!(status.players.is_none());
}

#[tokio::test]
async fn silent_server_times_out() {
    let addr = serve_once(|_| None).await;

    let err = query_default(&addr.to_string(), Duration::from_millis(200)).await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err}");
}

#[tokio::test]
async fn bad_header_is_a_codec_error() {
    let addr = serve_once(|_| Some(vec![0x09, 0x00])).await;

    let err = query_default(&addr.to_string(), Duration::from_secs(2)).await.unwrap_err();
    assert!(matches!(err, QueryError::Codec(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn short_reply_is_a_decode_error() {
    let addr = serve_once(|request| {
        let mut plain = deathmatch_reply(request_word(&request, 1));
        plain.truncate(plain.len() - 2);
        Some(huffman::encode(&plain))
    })
    .await;

    let err = query_default(&addr.to_string(), Duration::from_secs(2)).await.unwrap_err();
    assert!(
        matches!(err, QueryError::Decode(zandro_query::DecodeError::TruncatedBuffer { .. })),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn unresolvable_address_is_a_transport_error() {
    let err = query_default("bad host:port", Duration::from_millis(100)).await.unwrap_err();
    assert!(matches!(err, QueryError::Transport(TransportError::InvalidAddress(_))));
}

/// Transport that replays a canned datagram and records what it was given.
struct Canned {
    reply: Option<Vec<u8>>,
    sent: Vec<(Vec<u8>, SocketAddr)>,
}

impl Transport for Canned {
    async fn send(&mut self, payload: &[u8], target: SocketAddr) -> Result<(), TransportError> {
        self.sent.push((payload.to_vec(), target));
        Ok(())
    }

    async fn receive(&mut self, _max_bytes: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        self.reply.take().ok_or(TransportError::Timeout(timeout))
    }
}

#[tokio::test]
async fn report_exposes_every_stage() {
    let request = QueryRequest::new(QueryFlags::default_request(), ExtendedFlags::empty(), 42);
    let plain = deathmatch_reply(request.flags().bits());
    let datagram = huffman::encode(&plain);
    let mut transport = Canned { reply: Some(datagram.clone()), sent: Vec::new() };
    let target: SocketAddr = "192.0.2.1:10666".parse().unwrap();

    let report = query_with(&mut transport, target, &request, &QueryOptions::default()).await;

    assert_eq!(transport.sent, vec![(request.encode(), target)]);
    assert_eq!(report.sent, request.encode());
    assert_eq!(report.received, Some(datagram));
    assert_eq!(report.decoded, Some(plain));
    let status = report.into_result().unwrap();
    assert_eq!(status.players.map(|p| p.len()), Some(1));
}

#[tokio::test]
async fn transport_timeout_is_reported_unchanged() {
    let request = QueryRequest::new(QueryFlags::default_request(), ExtendedFlags::empty(), 42);
    let mut transport = Canned { reply: None, sent: Vec::new() };
    let options = QueryOptions { timeout: Duration::from_millis(5), ..QueryOptions::default() };

    let report = query_with(&mut transport, "192.0.2.1:10666".parse().unwrap(), &request, &options).await;

    assert_eq!(report.received, None);
    assert!(matches!(
        report.outcome,
        Err(QueryError::Transport(TransportError::Timeout(t))) if t == Duration::from_millis(5)
    ));
}
