use std::fmt;
use std::sync::Arc;

use crate::dns_record::{RecordClass, RecordType};
use crate::dns_request::{OpCode, Question, Request};
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    NotAuth,
}

impl ResponseCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::NotAuth => 9,
        }
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(ResponseCode::NoError),
            1 => Some(ResponseCode::FormErr),
            2 => Some(ResponseCode::ServFail),
            3 => Some(ResponseCode::NXDomain),
            4 => Some(ResponseCode::NotImp),
            5 => Some(ResponseCode::Refused),
            9 => Some(ResponseCode::NotAuth),
            _ => None,
        }
    }

    /// Lookup, authorization and request-shape failures are refused; anything
    /// else means this server could not do its job.
    pub fn for_error(error: &DomainError) -> Self {
        if error.is_refusal() {
            ResponseCode::Refused
        } else {
            ResponseCode::ServFail
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotAuth => "NOTAUTH",
        };
        write!(f, "{}", text)
    }
}

/// Records sharing owner name, type and class, as they go on the wire.
/// `data` holds presentation-format rdata, one entry per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecordSet {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub record_class: RecordClass,
    pub ttl: u32,
    pub data: Vec<Arc<str>>,
}

impl ResourceRecordSet {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        ttl: u32,
        data: Vec<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            record_class: RecordClass::IN,
            ttl,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub id: u16,
    pub opcode: OpCode,
    pub recursion_desired: bool,
    pub questions: Vec<Question>,
    pub rcode: ResponseCode,
    pub authoritative: bool,
    pub answers: Vec<ResourceRecordSet>,
}

impl Response {
    /// Fresh NOERROR response mirroring the request id, opcode and questions.
    pub fn for_request(request: &Request) -> Self {
        Self {
            id: request.id,
            opcode: request.opcode,
            recursion_desired: request.recursion_desired,
            questions: request.questions.clone(),
            rcode: ResponseCode::NoError,
            authoritative: false,
            answers: Vec::new(),
        }
    }

    pub fn error(request: &Request, rcode: ResponseCode) -> Self {
        let mut response = Self::for_request(request);
        response.rcode = rcode;
        response
    }

    pub fn refused(request: &Request) -> Self {
        Self::error(request, ResponseCode::Refused)
    }

    /// Authoritative NOERROR answer carrying `answers`.
    pub fn authoritative_answer(request: &Request, answers: Vec<ResourceRecordSet>) -> Self {
        let mut response = Self::for_request(request);
        response.authoritative = true;
        response.answers = answers;
        response
    }

    /// Total number of individual records across every answer set.
    pub fn answer_record_count(&self) -> usize {
        self.answers.iter().map(ResourceRecordSet::len).sum()
    }
}
