pub mod disk_constants {
    // Fixed drive geometry. These are build-time constants shared between
    // the driver and the simulated device, not runtime configuration.
    pub const MIN_REQUEST_NUMBER: i32 = 1;
    pub const MIN_BLOCK_NUMBER: i32 = 1;
    pub const MAX_BLOCK_NUMBER: i32 = 360;

    pub const BYTES_PER_BLOCK: i32 = 1024;
    pub const BYTES_PER_SECTOR: i32 = 512;
    pub const CYLINDERS: i32 = 40;
    pub const SECTORS_PER_TRACK: i32 = 9;
    pub const TRACKS_PER_CYLINDER: i32 = 2;
    pub const BYTES_PER_CYLINDER: i32 =
        BYTES_PER_SECTOR * SECTORS_PER_TRACK * TRACKS_PER_CYLINDER;

    // Capacity of the client message rendezvous queue per exchange.
    pub const FS_MESSAGE_COUNT: usize = 20;

    // Idle exchanges tolerated before the motor is spun down.
    pub const IDLE_SHUTDOWN_THRESHOLD: u32 = 1;
}

use disk_constants::SECTORS_PER_TRACK;

/// Physical address of a block: where on the platters it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cylinder: i32,
    pub track: i32,
    pub sector: i32,
}

/// Converts a logical block number to cylinder, track, and sector numbers.
///
/// The track/sector folding is the device's addressing contract and is
/// reproduced exactly, including its behavior on out-of-range inputs;
/// range checking belongs to the validator, not to the mapper.
pub fn map_block(block_number: i32) -> Geometry {
    let cylinder = (block_number - 1) / SECTORS_PER_TRACK;

    // Upper half of a track's sector range lands on the second head.
    let remainder = (block_number - 1) % SECTORS_PER_TRACK;
    let track = if remainder * 2 >= SECTORS_PER_TRACK { 1 } else { 0 };

    let mut sector = remainder * 2;
    if sector > SECTORS_PER_TRACK {
        sector -= SECTORS_PER_TRACK;
    }

    Geometry {
        cylinder,
        track,
        sector,
    }
}
