use std::process;

use anyhow::Error;

use spindle::client::new_inbox;
use spindle::client::scripted::ScriptedClient;
use spindle::device::sim_disk::SimDisk;
use spindle::driver::DriverContext;
use spindle::geometry::disk_constants::BYTES_PER_SECTOR;
use spindle::request::{shared_buffer, ClientMessage, READ_OP_CODE, WRITE_OP_CODE};

fn write_message(request_number: i32, block_number: i32, fill: u8) -> ClientMessage {
    ClientMessage {
        operation_code: WRITE_OP_CODE,
        request_number,
        block_number,
        block_size: BYTES_PER_SECTOR,
        data: Some(shared_buffer(&vec![fill; BYTES_PER_SECTOR as usize])),
    }
}

fn read_message(request_number: i32, block_number: i32) -> ClientMessage {
    ClientMessage {
        operation_code: READ_OP_CODE,
        request_number,
        block_number,
        block_size: BYTES_PER_SECTOR,
        data: Some(shared_buffer(&vec![0; BYTES_PER_SECTOR as usize])),
    }
}

fn main() {
    let inbox = new_inbox();
    let mut client = ScriptedClient::new(inbox.clone());

    // Writes arrive out of cylinder order; the scan services them sorted.
    client.enqueue_batch(vec![
        write_message(1, 50, 0x11),
        write_message(2, 10, 0x22),
        write_message(3, 30, 0x33),
    ]);
    // Read one block back, plus a request that fails validation.
    client.enqueue_batch(vec![
        read_message(4, 10),
        ClientMessage {
            operation_code: WRITE_OP_CODE,
            request_number: 5,
            block_number: 10,
            block_size: 0,
            data: Some(shared_buffer(&[0u8; 8])),
        },
    ]);

    let mut driver = DriverContext::new(SimDisk::new(), client, inbox);
    match driver.run() {
        Ok(report) => {
            println!(
                "serviced {} requests ({} validation failures, {} seek retries, {} checksum retries, {} idle notices)",
                report.serviced,
                report.validation_failures,
                report.seek_retries,
                report.checksum_retries,
                report.idle_notices
            );
            println!("completion order: {:?}", driver.client().completed());
        }
        Err(fatal) => {
            let code = fatal.exit_code();
            eprintln!("{:#}", Error::new(fatal).context("dispatch loop aborted"));
            process::exit(code);
        }
    }
}
