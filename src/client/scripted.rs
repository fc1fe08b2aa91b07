use std::collections::VecDeque;

use crate::client::{Client, ClientInbox, ClientStatus, Notice};
use crate::geometry::disk_constants::FS_MESSAGE_COUNT;
use crate::request::ClientMessage;

/// Replays pre-programmed message batches, one batch per exchange, and
/// records every notice the driver sends back. Reports `Done` once the
/// script is spent and every delivered request has been completed.
pub struct ScriptedClient {
    inbox: ClientInbox,
    batches: VecDeque<Vec<ClientMessage>>,
    outstanding: usize,
    notices: Vec<Notice>,
}

impl ScriptedClient {
    pub fn new(inbox: ClientInbox) -> Self {
        Self {
            inbox,
            batches: VecDeque::new(),
            outstanding: 0,
            notices: Vec::new(),
        }
    }

    pub fn enqueue_batch(&mut self, messages: Vec<ClientMessage>) {
        assert!(
            messages.len() <= FS_MESSAGE_COUNT,
            "batch exceeds the message exchange capacity"
        );
        self.batches.push_back(messages);
    }

    /// Every notice received, in delivery order.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Request numbers of completions, in delivery order.
    pub fn completed(&self) -> Vec<i32> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Complete { request_number, .. } => Some(*request_number),
                Notice::Idle => None,
            })
            .collect()
    }
}

impl Client for ScriptedClient {
    fn exchange(&mut self, notice: &Notice) -> ClientStatus {
        if let Notice::Complete { .. } = notice {
            debug_assert!(self.outstanding > 0, "completion with nothing outstanding");
            self.outstanding = self.outstanding.saturating_sub(1);
        }
        self.notices.push(notice.clone());

        if let Some(batch) = self.batches.pop_front() {
            for message in batch {
                if message.is_idle() {
                    continue;
                }
                self.outstanding += 1;
                self.inbox
                    .push(message)
                    .expect("scripted batch overflowed the inbox");
            }
        }

        if self.batches.is_empty() && self.outstanding == 0 {
            ClientStatus::Done
        } else {
            ClientStatus::Active
        }
    }
}
