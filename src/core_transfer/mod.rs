pub mod codec;

pub use codec::TransferType;
