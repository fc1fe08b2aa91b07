pub mod client;
pub mod device;
pub mod driver;
pub mod geometry;
pub mod queue;
pub mod request;
pub mod validate;

#[cfg(test)]
mod tests;
