pub mod mail;
pub mod memory;
pub mod sweeper;
