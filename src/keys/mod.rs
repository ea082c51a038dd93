pub mod codec;
pub mod number;
