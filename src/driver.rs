use thiserror::Error;

use crate::client::{Client, ClientInbox, ClientStatus, Notice};
use crate::device::{Device, DeviceError, TransferStatus};
use crate::geometry::disk_constants::IDLE_SHUTDOWN_THRESHOLD;
use crate::queue::RequestQueue;
use crate::request::{Request, READ_OP_CODE};
use crate::validate::validate;

/// Simulation-breaking faults. None of these are retried; the process is
/// expected to terminate with the matching exit code.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("disk controller rejected the transfer setup: {0}")]
    TransferConfiguration(#[from] DeviceError),

    #[error("heads still off cylinder {cylinder} after {attempts} seek attempts")]
    SeekExhausted { cylinder: i32, attempts: u32 },

    #[error("request {request_number} failed its checksum {attempts} times")]
    TransferExhausted { request_number: i32, attempts: u32 },
}

impl FatalError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FatalError::TransferConfiguration(_) => 1,
            FatalError::SeekExhausted { .. } => 2,
            FatalError::TransferExhausted { .. } => 3,
        }
    }
}

/// Bounds on the retry-until-success loops. `None` retries forever, the
/// original device contract; tests inject limits so persistent faults
/// surface as errors instead of hangs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    pub max_seek_attempts: Option<u32>,
    pub max_transfer_attempts: Option<u32>,
}

/// Plain counters accumulated by the dispatch loop.
#[derive(Debug, Clone, Default)]
pub struct DriverReport {
    pub serviced: u32,
    pub validation_failures: u32,
    pub seek_retries: u32,
    pub checksum_retries: u32,
    pub idle_notices: u32,
}

/// Owns the pending queue and both collaborators and runs the scan loop:
/// drain arrivals, pick the next request in cylinder order, seek, validate,
/// transfer, report, remove. Single actor; nothing here needs a lock.
pub struct DriverContext<D: Device, C: Client> {
    queue: RequestQueue,
    inbox: ClientInbox,
    device: D,
    client: C,
    retry: RetryPolicy,
    current_cylinder: i32,
    motor_on: bool,
    idle_counter: u32,
    report: DriverReport,
}

impl<D: Device, C: Client> DriverContext<D, C> {
    pub fn new(device: D, client: C, inbox: ClientInbox) -> Self {
        Self {
            queue: RequestQueue::new(),
            inbox,
            device,
            client,
            retry: RetryPolicy::default(),
            current_cylinder: 0,
            motor_on: false,
            idle_counter: 0,
            report: DriverReport::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn report(&self) -> &DriverReport {
        &self.report
    }

    /// Services requests until the client reports it is done and the
    /// backlog is empty. Fatal faults abort the loop.
    pub fn run(&mut self) -> Result<DriverReport, FatalError> {
        loop {
            self.drain_inbox();

            if self.queue.count_pending() == 0 {
                let status = self.client.exchange(&Notice::Idle);
                self.report.idle_notices += 1;
                self.drain_inbox();

                if self.queue.count_pending() == 0 {
                    self.idle_counter += 1;
                    if self.idle_counter >= IDLE_SHUTDOWN_THRESHOLD {
                        if self.motor_on {
                            self.motor_on = self.device.stop_motor();
                        }
                        self.idle_counter = 0;
                    }
                    if status == ClientStatus::Done {
                        if self.motor_on {
                            self.motor_on = self.device.stop_motor();
                        }
                        return Ok(self.report.clone());
                    }
                }
                continue;
            }

            if !self.motor_on {
                // Spin up and settle before servicing anything; the next
                // iteration picks up from the sensed head position.
                self.motor_on = self.device.start_motor();
                self.device.motor_status();
                self.current_cylinder = self.device.sense_cylinder();
                continue;
            }

            self.service_next()?;
        }
    }

    /// Copies newly arrived client messages into the queue in sorted order.
    fn drain_inbox(&mut self) {
        while let Some(message) = self.inbox.pop() {
            if message.is_idle() {
                continue;
            }
            self.queue.insert(Request::from_message(&message));
        }
    }

    fn service_next(&mut self) -> Result<(), FatalError> {
        let request = match self.queue.next_request(self.current_cylinder) {
            Some(request) => request.clone(),
            None => return Ok(()),
        };

        if self.current_cylinder != request.geometry.cylinder {
            self.seek_to(request.geometry.cylinder)?;
        }

        let error = validate(&request);
        if error.is_empty() {
            // A clean request always carries a buffer; the validator's
            // data-address check guarantees it.
            if let Some(data) = &request.data {
                self.device.configure_transfer(
                    request.geometry.sector,
                    request.geometry.track,
                    request.block_size,
                    data,
                )?;
                self.transfer(&request)?;
            }
        } else {
            self.report.validation_failures += 1;
        }

        let notice = Notice::Complete {
            error_code: error.wire_code(),
            request_number: request.request_number,
            block_number: request.block_number,
            block_size: request.block_size,
            data: request.data.clone(),
        };
        self.client.exchange(&notice);
        self.drain_inbox();

        if self.queue.remove(request.request_number).is_none() {
            // Unreachable by construction: the serviced request was read
            // out of the queue this iteration.
            eprintln!(
                "serviced request {} vanished from the queue",
                request.request_number
            );
            debug_assert!(false, "serviced request vanished from the queue");
        }
        self.report.serviced += 1;
        Ok(())
    }

    /// Seeks until the heads report the target cylinder, recalibrating
    /// after every miss.
    fn seek_to(&mut self, cylinder: i32) -> Result<(), FatalError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            self.current_cylinder = self.device.seek(cylinder);
            if self.current_cylinder == cylinder {
                return Ok(());
            }

            self.report.seek_retries += 1;
            self.current_cylinder = self.device.recalibrate();
            if self.current_cylinder == cylinder {
                return Ok(());
            }

            if let Some(max) = self.retry.max_seek_attempts {
                if attempts >= max {
                    return Err(FatalError::SeekExhausted { cylinder, attempts });
                }
            }
        }
    }

    /// Reads or writes, retrying while the controller reports checksum
    /// mismatches.
    fn transfer(&mut self, request: &Request) -> Result<(), FatalError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let status = if request.operation_code == READ_OP_CODE {
                self.device.read()
            } else {
                self.device.write()
            };
            if status == TransferStatus::Success {
                return Ok(());
            }

            self.report.checksum_retries += 1;
            if let Some(max) = self.retry.max_transfer_attempts {
                if attempts >= max {
                    return Err(FatalError::TransferExhausted {
                        request_number: request.request_number,
                        attempts,
                    });
                }
            }
        }
    }
}
