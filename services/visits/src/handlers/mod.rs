pub mod status;
pub mod visit;
