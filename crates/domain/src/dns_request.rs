use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::dns_record::{RecordClass, RecordType};
use crate::names::normalize_name;
use crate::request_context::RequestContext;
use crate::tsig::TsigKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    Unknown(u8),
}

impl OpCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::IQuery => 1,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::Unknown(code) => *code,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            other => OpCode::Unknown(other),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Query => write!(f, "QUERY"),
            OpCode::IQuery => write!(f, "IQUERY"),
            OpCode::Status => write!(f, "STATUS"),
            OpCode::Notify => write!(f, "NOTIFY"),
            OpCode::Update => write!(f, "UPDATE"),
            OpCode::Unknown(code) => write!(f, "OPCODE{}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl Question {
    pub fn new(name: &str, record_type: RecordType, record_class: RecordClass) -> Self {
        Self {
            name: Arc::from(normalize_name(name)),
            record_type,
            record_class,
        }
    }

    pub fn internet(name: &str, record_type: RecordType) -> Self {
        Self::new(name, record_type, RecordClass::IN)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_class, self.record_type)
    }
}

/// A decoded DNS message as seen by the responders.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: u16,
    pub opcode: OpCode,
    pub recursion_desired: bool,
    pub questions: Vec<Question>,
    pub tsig_key: Option<TsigKey>,
    pub source: SocketAddr,
    pub context: RequestContext,
}

impl Request {
    pub fn new(id: u16, opcode: OpCode, source: SocketAddr) -> Self {
        Self {
            id,
            opcode,
            recursion_desired: false,
            questions: Vec::new(),
            tsig_key: None,
            source,
            context: RequestContext::new(format!("{:04x}", id)),
        }
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn with_tsig_key(mut self, key: TsigKey) -> Self {
        self.tsig_key = Some(key);
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// The question, when the message carries exactly one.
    pub fn single_question(&self) -> Option<&Question> {
        match self.questions.as_slice() {
            [question] => Some(question),
            _ => None,
        }
    }
}
