use std::collections::{HashMap, VecDeque};

use crc32fast::Hasher;

use crate::device::{Device, DeviceError, TransferStatus};
use crate::geometry::disk_constants::{
    BYTES_PER_CYLINDER, SECTORS_PER_TRACK, TRACKS_PER_CYLINDER,
};
use crate::request::DataBuffer;

fn checksum(bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

struct SectorImage {
    bytes: Vec<u8>,
    checksum: u32,
}

struct TransferChannel {
    cylinder: i32,
    track: i32,
    sector: i32,
    size: i32,
    data: DataBuffer,
}

/// In-memory disk drive. Sector images carry a crc32 so corrupted data
/// surfaces as a checksum error, and fault queues let tests script seek
/// misses and transient transfer failures.
pub struct SimDisk {
    platters: HashMap<(i32, i32, i32), SectorImage>,
    motor_on: bool,
    cylinder: i32,
    channel: Option<TransferChannel>,
    // Cylinders the next seeks erroneously land on, consumed FIFO.
    seek_misses: VecDeque<i32>,
    // Number of upcoming transfers that report a checksum error once each.
    transfer_faults: u32,
}

impl SimDisk {
    pub fn new() -> Self {
        Self {
            platters: HashMap::new(),
            motor_on: false,
            cylinder: 0,
            channel: None,
            seek_misses: VecDeque::new(),
            transfer_faults: 0,
        }
    }

    /// The next seek lands on `landing` instead of its target.
    pub fn inject_seek_miss(&mut self, landing: i32) {
        self.seek_misses.push_back(landing);
    }

    /// The next `count` reads or writes fail their checksum once each.
    pub fn inject_checksum_faults(&mut self, count: u32) {
        self.transfer_faults += count;
    }

    /// Damages a stored sector without refreshing its checksum, so every
    /// read of it fails until it is rewritten.
    pub fn corrupt_sector(&mut self, cylinder: i32, track: i32, sector: i32) {
        if let Some(image) = self.platters.get_mut(&(cylinder, track, sector)) {
            if let Some(byte) = image.bytes.first_mut() {
                *byte ^= 0xff;
            }
        }
    }

    /// Stored bytes of a sector, for assertions.
    pub fn sector_bytes(&self, cylinder: i32, track: i32, sector: i32) -> Option<&[u8]> {
        self.platters
            .get(&(cylinder, track, sector))
            .map(|image| image.bytes.as_slice())
    }

    fn channel_parts(&self) -> Option<((i32, i32, i32), usize, DataBuffer)> {
        self.channel.as_ref().map(|channel| {
            (
                (channel.cylinder, channel.track, channel.sector),
                channel.size as usize,
                channel.data.clone(),
            )
        })
    }
}

impl Default for SimDisk {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for SimDisk {
    fn start_motor(&mut self) -> bool {
        self.motor_on = true;
        self.motor_on
    }

    fn stop_motor(&mut self) -> bool {
        self.motor_on = false;
        self.motor_on
    }

    fn motor_status(&self) -> bool {
        self.motor_on
    }

    fn sense_cylinder(&mut self) -> i32 {
        self.cylinder
    }

    fn seek(&mut self, cylinder: i32) -> i32 {
        self.cylinder = match self.seek_misses.pop_front() {
            Some(landing) => landing,
            None => cylinder,
        };
        self.cylinder
    }

    fn recalibrate(&mut self) -> i32 {
        self.cylinder = 0;
        self.cylinder
    }

    fn configure_transfer(
        &mut self,
        sector: i32,
        track: i32,
        size: i32,
        data: &DataBuffer,
    ) -> Result<(), DeviceError> {
        let sector_in_range = sector >= 0 && sector < SECTORS_PER_TRACK * 2;
        let track_in_range = track >= 0 && track < TRACKS_PER_CYLINDER;
        let size_in_range = size > 0
            && size <= BYTES_PER_CYLINDER
            && data.lock().unwrap().len() >= size as usize;

        if !sector_in_range || !track_in_range || !size_in_range {
            self.channel = None;
            return Err(DeviceError::ImpossibleConfiguration {
                sector,
                track,
                size,
            });
        }

        self.channel = Some(TransferChannel {
            cylinder: self.cylinder,
            track,
            sector,
            size,
            data: data.clone(),
        });
        Ok(())
    }

    fn read(&mut self) -> TransferStatus {
        let Some((key, size, data)) = self.channel_parts() else {
            debug_assert!(false, "read without a configured transfer channel");
            return TransferStatus::ChecksumError;
        };
        if self.transfer_faults > 0 {
            self.transfer_faults -= 1;
            return TransferStatus::ChecksumError;
        }

        let mut guard = data.lock().unwrap();
        match self.platters.get(&key) {
            Some(image) => {
                if checksum(&image.bytes) != image.checksum {
                    return TransferStatus::ChecksumError;
                }
                // A shorter stored image pads the remainder with zeros.
                let copied = size.min(image.bytes.len());
                guard[..copied].copy_from_slice(&image.bytes[..copied]);
                guard[copied..size].fill(0);
            }
            None => guard[..size].fill(0),
        }
        TransferStatus::Success
    }

    fn write(&mut self) -> TransferStatus {
        let Some((key, size, data)) = self.channel_parts() else {
            debug_assert!(false, "write without a configured transfer channel");
            return TransferStatus::ChecksumError;
        };
        if self.transfer_faults > 0 {
            self.transfer_faults -= 1;
            return TransferStatus::ChecksumError;
        }

        let guard = data.lock().unwrap();
        let bytes = guard[..size].to_vec();
        self.platters.insert(
            key,
            SectorImage {
                checksum: checksum(&bytes),
                bytes,
            },
        );
        TransferStatus::Success
    }
}
