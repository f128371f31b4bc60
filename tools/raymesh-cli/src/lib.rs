//! raymesh-cli - command implementations for the `raymesh` binary

pub mod commands;
pub mod events;
pub mod headless;
