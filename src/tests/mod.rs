mod geometry_test;
mod queue_test;
mod sim_disk_test;
