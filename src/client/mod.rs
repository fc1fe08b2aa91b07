use std::sync::Arc;

use crossbeam_queue::ArrayQueue;

use crate::geometry::disk_constants::FS_MESSAGE_COUNT;
use crate::request::{ClientMessage, DataBuffer};

pub mod scripted;

/// Rendezvous queue between client and driver. Bounded to the batch size,
/// lock-free, so a client on another thread may push while the driver pops.
pub type ClientInbox = Arc<ArrayQueue<ClientMessage>>;

pub fn new_inbox() -> ClientInbox {
    Arc::new(ArrayQueue::new(FS_MESSAGE_COUNT))
}

/// What the driver hands the client on each exchange. A completion notice
/// mirrors the request fields, with the aggregate error code in the slot
/// the operation code arrived in.
#[derive(Debug, Clone)]
pub enum Notice {
    Idle,
    Complete {
        error_code: i32,
        request_number: i32,
        block_number: i32,
        block_size: i32,
        data: Option<DataBuffer>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    Active,
    /// The client will never supply more work; the driver may shut down
    /// once its backlog drains.
    Done,
}

/// The file-system side of the conversation. During `exchange` the client
/// may push new messages into its inbox; the driver drains it afterward.
pub trait Client {
    fn exchange(&mut self, notice: &Notice) -> ClientStatus;
}
