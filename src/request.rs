use std::sync::{Arc, Mutex};

use bytes::BytesMut;

use crate::geometry::{map_block, Geometry};

/// In-memory data block exchanged with the client. The driver never owns
/// it; both sides hold handles and the lock keeps them from aliasing.
pub type DataBuffer = Arc<Mutex<BytesMut>>;

pub const IDLE_OP_CODE: i32 = 0;
pub const READ_OP_CODE: i32 = 1;
pub const WRITE_OP_CODE: i32 = 2;

/// One slot of the client's message batch. An operation code of zero is the
/// "no message" sentinel that terminates a batch.
#[derive(Debug, Clone)]
pub struct ClientMessage {
    pub operation_code: i32,
    pub request_number: i32,
    pub block_number: i32,
    pub block_size: i32,
    pub data: Option<DataBuffer>,
}

impl ClientMessage {
    pub fn idle() -> Self {
        Self {
            operation_code: IDLE_OP_CODE,
            request_number: 0,
            block_number: 0,
            block_size: 0,
            data: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.operation_code == IDLE_OP_CODE
    }
}

/// Wraps raw bytes into a buffer handle the driver and client can share.
pub fn shared_buffer(bytes: &[u8]) -> DataBuffer {
    Arc::new(Mutex::new(BytesMut::from(bytes)))
}

/// A pending request in the queue. Geometry is stamped once at creation
/// and never recomputed.
#[derive(Debug, Clone)]
pub struct Request {
    pub operation_code: i32,
    pub request_number: i32,
    pub block_number: i32,
    pub geometry: Geometry,
    pub block_size: i32,
    pub data: Option<DataBuffer>,
}

impl Request {
    pub fn from_message(message: &ClientMessage) -> Self {
        Self {
            operation_code: message.operation_code,
            request_number: message.request_number,
            block_number: message.block_number,
            geometry: map_block(message.block_number),
            block_size: message.block_size,
            data: message.data.clone(),
        }
    }
}
