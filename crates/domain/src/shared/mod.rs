pub mod entity;
pub mod status;
