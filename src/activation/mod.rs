pub mod transfer;

pub use transfer::{transfer, transfer_derivative};
