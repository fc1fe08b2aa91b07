use thiserror::Error;

use crate::request::DataBuffer;

pub mod sim_disk;

/// Outcome of a read or write once the channel is configured. Checksum
/// mismatches are transient and retried by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Success,
    ChecksumError,
}

/// Unrecoverable controller faults. The driver treats these as fatal.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("impossible transfer configuration: sector {sector}, track {track}, size {size}")]
    ImpossibleConfiguration { sector: i32, track: i32, size: i32 },
}

/// Command surface of the disk. Every call is atomic and always returns;
/// the drive reports its state, it never blocks the caller.
pub trait Device {
    /// Returns the motor state after the command.
    fn start_motor(&mut self) -> bool;

    /// Returns the motor state after the command.
    fn stop_motor(&mut self) -> bool;

    fn motor_status(&self) -> bool;

    /// Cylinder the heads currently rest on.
    fn sense_cylinder(&mut self) -> i32;

    /// Moves the heads toward the target and reports where they landed,
    /// which need not be the target on a flaky drive.
    fn seek(&mut self, cylinder: i32) -> i32;

    /// Returns the heads to cylinder zero and reports the landing.
    fn recalibrate(&mut self) -> i32;

    /// Arms the transfer channel for a subsequent read or write.
    fn configure_transfer(
        &mut self,
        sector: i32,
        track: i32,
        size: i32,
        data: &DataBuffer,
    ) -> Result<(), DeviceError>;

    fn read(&mut self) -> TransferStatus;

    fn write(&mut self) -> TransferStatus;
}
