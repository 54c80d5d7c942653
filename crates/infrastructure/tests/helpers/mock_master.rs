use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, MX, SOA};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub enum UdpBehaviour {
    Soa(u32),
    Rcode(ResponseCode),
    Truncated,
    WrongId(u32),
    Silent,
}

#[derive(Clone)]
pub enum TcpBehaviour {
    Soa(u32),
    /// One reply message per inner vector.
    Stream(Vec<Vec<Record>>),
    Rcode(ResponseCode),
    CloseAfterQuery,
    Stall,
}

/// In-process primary server answering on one port over UDP and TCP.
pub struct MockMaster {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockMaster {
    pub async fn start(udp: UdpBehaviour, tcp: TcpBehaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let socket = UdpSocket::bind(addr).await.unwrap();
        let udp_queries = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&udp_queries);
        let udp_task = tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                counter.fetch_add(1, Ordering::SeqCst);
                let query = Message::from_vec(&buf[..len]).unwrap();
                let reply = match &udp {
                    UdpBehaviour::Soa(serial) => reply(&query, ResponseCode::NoError, vec![soa_record("example.org.", *serial)]),
                    UdpBehaviour::Rcode(rcode) => reply(&query, *rcode, vec![]),
                    UdpBehaviour::Truncated => truncated_reply(&query),
                    UdpBehaviour::WrongId(serial) => {
                        let mut bytes = reply(&query, ResponseCode::NoError, vec![soa_record("example.org.", *serial)]);
                        bytes[0] ^= 0xff;
                        bytes
                    }
                    UdpBehaviour::Silent => continue,
                };
                let _ = socket.send_to(&reply, peer).await;
            }
        });

        let tcp_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let behaviour = tcp.clone();
                tokio::spawn(serve_tcp(stream, behaviour));
            }
        });

        Self {
            addr,
            udp_queries,
            tasks: vec![udp_task, tcp_task],
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_query_count(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockMaster {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn serve_tcp(mut stream: TcpStream, behaviour: TcpBehaviour) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query_buf = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query_buf).await.is_err() {
        return;
    }
    let query = Message::from_vec(&query_buf).unwrap();

    let messages = match behaviour {
        TcpBehaviour::Soa(serial) => vec![reply(&query, ResponseCode::NoError, vec![soa_record("example.org.", serial)])],
        TcpBehaviour::Stream(chunks) => chunks
            .into_iter()
            .map(|records| reply(&query, ResponseCode::NoError, records))
            .collect(),
        TcpBehaviour::Rcode(rcode) => vec![reply(&query, rcode, vec![])],
        TcpBehaviour::CloseAfterQuery => return,
        TcpBehaviour::Stall => {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            return;
        }
    };

    for message in messages {
        let _ = stream.write_all(&(message.len() as u16).to_be_bytes()).await;
        let _ = stream.write_all(&message).await;
    }
    let _ = stream.flush().await;
}

fn reply(query: &Message, rcode: ResponseCode, answers: Vec<Record>) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_authoritative(true)
        .set_response_code(rcode);
    message.add_queries(query.queries().to_vec());
    message.add_answers(answers);
    message.to_vec().unwrap()
}

fn truncated_reply(query: &Message) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_truncated(true);
    message.add_queries(query.queries().to_vec());
    message.to_vec().unwrap()
}

pub fn soa_record(zone: &str, serial: u32) -> Record {
    Record::from_rdata(
        Name::from_str(zone).unwrap(),
        3600,
        RData::SOA(SOA::new(
            Name::from_str("ns1.example.org.").unwrap(),
            Name::from_str("admin.example.org.").unwrap(),
            serial,
            3600,
            600,
            86400,
            300,
        )),
    )
}

pub fn a_record(name: &str, ip: [u8; 4]) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        300,
        RData::A(A(Ipv4Addr::from(ip))),
    )
}

pub fn mx_record(name: &str, preference: u16, exchange: &str) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        300,
        RData::MX(MX::new(preference, Name::from_str(exchange).unwrap())),
    )
}
