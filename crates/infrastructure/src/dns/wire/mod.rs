pub mod codec;
pub mod message_builder;
pub mod rdata_parser;
pub mod record_type_map;
pub mod response_parser;

pub use codec::{WireCodec, MAX_UDP_RESPONSE_SIZE};
pub use message_builder::MessageBuilder;
pub use rdata_parser::RdataParser;
pub use record_type_map::RecordTypeMapper;
pub use response_parser::{ParsedResponse, ResponseParser};
