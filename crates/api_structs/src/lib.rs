mod lifecycle;
mod status;

pub mod dtos {
    pub use crate::lifecycle::dtos::*;
}

pub use crate::lifecycle::api::*;
pub use crate::status::api::*;
