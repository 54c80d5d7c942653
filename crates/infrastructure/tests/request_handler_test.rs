use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

mod helpers;
use helpers::*;

fn client() -> SocketAddr {
    "127.0.0.1:40001".parse().unwrap()
}

fn request_bytes(name: &str, qtype: RecordType, opcode: OpCode) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(0xbeef)
        .set_message_type(MessageType::Query)
        .set_op_code(opcode);
    message.add_query(Query::query(Name::from_str(name).unwrap(), qtype));
    message.to_vec().unwrap()
}

#[tokio::test]
async fn test_udp_query_is_answered_authoritatively() {
    let pool = create_test_db().await;
    seed_example_zone(&pool).await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let reply = handler
        .handle_udp(&request_bytes("www.example.org.", RecordType::A, OpCode::Query), client())
        .await
        .unwrap();
    let message = Message::from_vec(&reply).unwrap();

    assert_eq!(message.id(), 0xbeef);
    assert_eq!(message.response_code(), ResponseCode::NoError);
    assert!(message.authoritative());
    assert_eq!(message.answers().len(), 2);
    assert!(message.answers().iter().all(|r| r.ttl() == 300));
}

#[tokio::test]
async fn test_unknown_name_is_refused() {
    let pool = create_test_db().await;
    seed_example_zone(&pool).await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let reply = handler
        .handle_udp(&request_bytes("nope.example.org.", RecordType::A, OpCode::Query), client())
        .await
        .unwrap();
    let message = Message::from_vec(&reply).unwrap();

    assert_eq!(message.response_code(), ResponseCode::Refused);
    assert!(message.answers().is_empty());
}

#[tokio::test]
async fn test_axfr_over_tcp_is_framed_by_soa() {
    let pool = create_test_db().await;
    seed_example_zone(&pool).await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let replies = handler
        .handle_tcp(&request_bytes("example.org.", RecordType::AXFR, OpCode::Query), client())
        .await;

    let answers: Vec<_> = replies
        .iter()
        .flat_map(|bytes| Message::from_vec(bytes).unwrap().answers().to_vec())
        .collect();

    assert_eq!(answers.len(), 7);
    assert_eq!(answers.first().unwrap().record_type(), RecordType::SOA);
    assert_eq!(answers.last().unwrap().record_type(), RecordType::SOA);
    assert_eq!(
        answers[1..6].iter().filter(|r| r.record_type() == RecordType::SOA).count(),
        0
    );
}

#[tokio::test]
async fn test_axfr_is_split_across_small_messages() {
    let pool = create_test_db().await;
    seed_example_zone(&pool).await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 128);

    let replies = handler
        .handle_tcp(&request_bytes("example.org.", RecordType::AXFR, OpCode::Query), client())
        .await;

    assert!(replies.len() > 1);
    let total: usize = replies
        .iter()
        .map(|bytes| Message::from_vec(bytes).unwrap().answers().len())
        .sum();
    assert_eq!(total, 7);
}

#[tokio::test]
async fn test_undecodable_iquery_gets_refused_header() {
    let pool = create_test_db().await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let mut bytes = vec![0u8; 12];
    bytes[0] = 0x42;
    bytes[2] = 0x08; // opcode 1

    let reply = handler.handle_udp(&bytes, client()).await.unwrap();

    assert_eq!(reply.len(), 12);
    assert_eq!(reply[0], 0x42);
    assert_eq!(reply[3] & 0x0f, 5);
}

#[tokio::test]
async fn test_responses_are_not_answered() {
    let pool = create_test_db().await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let mut message = Message::new();
    message.set_id(3).set_message_type(MessageType::Response);

    assert!(handler
        .handle_udp(&message.to_vec().unwrap(), client())
        .await
        .is_none());
    assert!(handler
        .handle_tcp(&message.to_vec().unwrap(), client())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_notify_with_new_serial_schedules_resync() {
    let master = MockMaster::start(UdpBehaviour::Soa(200), TcpBehaviour::CloseAfterQuery).await;
    let pool = create_test_db().await;
    insert_zone_full(&pool, "sec", TEST_POOL, "example.org.", 100, "SECONDARY", false).await;
    insert_master(&pool, "sec", "127.0.0.1", master.addr().port() as i64).await;
    let scheduler = Arc::new(RecordingScheduler::default());
    let handler = build_handler(pool, scheduler.clone(), 16384);

    let reply = handler
        .handle_udp(&request_bytes("example.org.", RecordType::SOA, OpCode::Notify), client())
        .await
        .unwrap();
    let message = Message::from_vec(&reply).unwrap();

    assert_eq!(message.op_code(), OpCode::Notify);
    assert_eq!(message.response_code(), ResponseCode::NoError);
    assert!(message.authoritative());

    let scheduled = scheduler.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].0, "sec");
    assert_eq!(scheduled[0].1[0].socket_addr(), master.addr());
}

#[tokio::test]
async fn test_notify_from_unregistered_host_is_refused() {
    let pool = create_test_db().await;
    insert_zone_full(&pool, "sec", TEST_POOL, "example.org.", 100, "SECONDARY", false).await;
    insert_master(&pool, "sec", "192.0.2.1", 53).await;
    let scheduler = Arc::new(RecordingScheduler::default());
    let handler = build_handler(pool, scheduler.clone(), 16384);

    let reply = handler
        .handle_udp(&request_bytes("example.org.", RecordType::SOA, OpCode::Notify), client())
        .await
        .unwrap();
    let message = Message::from_vec(&reply).unwrap();

    assert_eq!(message.response_code(), ResponseCode::Refused);
    assert!(scheduler.scheduled().is_empty());
}

#[tokio::test]
async fn test_query_ignores_same_named_zone_in_foreign_pool() {
    let pool = create_test_db().await;
    insert_zone(&pool, "za", "other-pool", "example.org.", 1).await;
    insert_recordset(&pool, "aaa", "za", "www.example.org.", "A", None).await;
    insert_record(&pool, "r-foreign", "aaa", "198.51.100.1", "NONE").await;
    insert_zone(&pool, "zb", TEST_POOL, "example.org.", 1).await;
    insert_recordset(&pool, "bbb", "zb", "www.example.org.", "A", None).await;
    insert_record(&pool, "r-local", "bbb", "192.0.2.20", "NONE").await;
    let handler = build_handler(pool, Arc::new(RecordingScheduler::default()), 16384);

    let reply = handler
        .handle_udp(&request_bytes("www.example.org.", RecordType::A, OpCode::Query), client())
        .await
        .unwrap();
    let message = Message::from_vec(&reply).unwrap();

    assert_eq!(message.response_code(), ResponseCode::NoError);
    assert_eq!(message.answers().len(), 1);
    assert_eq!(
        message.answers()[0].data().map(|rdata| rdata.to_string()),
        Some("192.0.2.20".to_string())
    );
}
