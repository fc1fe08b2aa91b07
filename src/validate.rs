use bitflags::bitflags;
use bytes::Buf;

use crate::geometry::disk_constants::{
    BYTES_PER_CYLINDER, MAX_BLOCK_NUMBER, MIN_BLOCK_NUMBER, MIN_REQUEST_NUMBER,
};
use crate::request::{Request, READ_OP_CODE, WRITE_OP_CODE};

bitflags! {
    /// Composite validation error. Every check contributes its own bit so a
    /// request can fail several checks at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ValidationError: u32 {
        const OP_CODE        = 1;
        const REQUEST_NUMBER = 1 << 1;
        const BLOCK_NUMBER   = 1 << 2;
        const BLOCK_SIZE     = 1 << 3;
        const DATA_ADDRESS   = 1 << 4;
    }
}

impl ValidationError {
    /// Error code as reported to the client: zero when clean, otherwise the
    /// negative sum of the violated checks (-1, -2, -4, -8, -16).
    pub fn wire_code(self) -> i32 {
        -(self.bits() as i32)
    }
}

/// Halve while even; a power of two reduces to exactly one. Zero and
/// negative values fail.
pub fn power_of_two(value: i32) -> bool {
    let mut value = value;
    while value % 2 == 0 && value > 1 {
        value /= 2;
    }
    value == 1
}

/// Checks a request against dispatch policy. All checks run; nothing is
/// short-circuited. Pure: the request is not mutated.
pub fn validate(request: &Request) -> ValidationError {
    let mut error = ValidationError::empty();

    if request.operation_code != READ_OP_CODE && request.operation_code != WRITE_OP_CODE {
        error.insert(ValidationError::OP_CODE);
    }

    if request.request_number < MIN_REQUEST_NUMBER {
        error.insert(ValidationError::REQUEST_NUMBER);
    }

    if request.block_number < MIN_BLOCK_NUMBER || request.block_number > MAX_BLOCK_NUMBER {
        error.insert(ValidationError::BLOCK_NUMBER);
    }

    if request.block_size > BYTES_PER_CYLINDER || !power_of_two(request.block_size) {
        error.insert(ValidationError::BLOCK_SIZE);
    }

    // Simulation-only sanity check on the buffer: it must exist and its
    // leading word must read back non-negative.
    let data_ok = match &request.data {
        Some(buffer) => {
            let guard = buffer.lock().unwrap();
            let mut probe = &guard[..];
            guard.len() >= 8 && probe.get_i64() >= 0
        }
        None => false,
    };
    if !data_ok {
        error.insert(ValidationError::DATA_ADDRESS);
    }

    error
}
