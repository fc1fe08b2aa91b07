use crate::device::sim_disk::SimDisk;
use crate::device::{Device, TransferStatus};
use crate::request::{shared_buffer, DataBuffer};

fn buffer_of(fill: u8, len: usize) -> DataBuffer {
    shared_buffer(&vec![fill; len])
}

#[test]
fn motor_commands_report_the_new_state() {
    let mut disk = SimDisk::new();
    assert!(!disk.motor_status());
    assert!(disk.start_motor());
    assert!(disk.motor_status());
    assert!(!disk.stop_motor());
    assert!(!disk.motor_status());
}

#[test]
fn write_then_read_round_trips() {
    let mut disk = SimDisk::new();
    disk.start_motor();
    disk.seek(5);

    let outgoing = buffer_of(0xab, 512);
    disk.configure_transfer(8, 0, 512, &outgoing).unwrap();
    assert_eq!(disk.write(), TransferStatus::Success);
    assert_eq!(disk.sector_bytes(5, 0, 8), Some(&[0xab_u8; 512][..]));

    let incoming = buffer_of(0, 512);
    disk.configure_transfer(8, 0, 512, &incoming).unwrap();
    assert_eq!(disk.read(), TransferStatus::Success);
    assert_eq!(&incoming.lock().unwrap()[..], &[0xab_u8; 512][..]);
}

#[test]
fn reading_an_unwritten_sector_yields_zeros() {
    let mut disk = SimDisk::new();
    disk.start_motor();

    let incoming = buffer_of(0x77, 512);
    disk.configure_transfer(2, 1, 512, &incoming).unwrap();
    assert_eq!(disk.read(), TransferStatus::Success);
    assert_eq!(&incoming.lock().unwrap()[..], &[0u8; 512][..]);
}

#[test]
fn injected_faults_fail_once_each() {
    let mut disk = SimDisk::new();
    disk.start_motor();
    disk.inject_checksum_faults(2);

    let outgoing = buffer_of(0x01, 512);
    disk.configure_transfer(0, 0, 512, &outgoing).unwrap();
    assert_eq!(disk.write(), TransferStatus::ChecksumError);
    assert_eq!(disk.write(), TransferStatus::ChecksumError);
    assert_eq!(disk.write(), TransferStatus::Success);
}

#[test]
fn corrupted_sector_fails_until_rewritten() {
    let mut disk = SimDisk::new();
    disk.start_motor();

    let outgoing = buffer_of(0x42, 512);
    disk.configure_transfer(4, 1, 512, &outgoing).unwrap();
    assert_eq!(disk.write(), TransferStatus::Success);

    disk.corrupt_sector(0, 1, 4);
    let incoming = buffer_of(0, 512);
    disk.configure_transfer(4, 1, 512, &incoming).unwrap();
    assert_eq!(disk.read(), TransferStatus::ChecksumError);
    assert_eq!(disk.read(), TransferStatus::ChecksumError);

    disk.configure_transfer(4, 1, 512, &outgoing).unwrap();
    assert_eq!(disk.write(), TransferStatus::Success);
    disk.configure_transfer(4, 1, 512, &incoming).unwrap();
    assert_eq!(disk.read(), TransferStatus::Success);
}

#[test]
fn seek_misses_are_consumed_in_order() {
    let mut disk = SimDisk::new();
    disk.start_motor();
    disk.inject_seek_miss(7);

    assert_eq!(disk.seek(3), 7);
    assert_eq!(disk.recalibrate(), 0);
    assert_eq!(disk.seek(3), 3);
    assert_eq!(disk.sense_cylinder(), 3);
}

#[test]
fn impossible_configurations_are_rejected() {
    let mut disk = SimDisk::new();
    disk.start_motor();
    let data = buffer_of(0, 512);

    assert!(disk.configure_transfer(-1, 0, 512, &data).is_err());
    assert!(disk.configure_transfer(18, 0, 512, &data).is_err());
    assert!(disk.configure_transfer(0, 2, 512, &data).is_err());
    assert!(disk.configure_transfer(0, 0, 0, &data).is_err());
    assert!(disk.configure_transfer(0, 0, 16384, &data).is_err());
    // Buffer shorter than the transfer size.
    assert!(disk.configure_transfer(0, 0, 1024, &data).is_err());
}
