pub mod endianness;

pub use endianness::{Endianness, ParseEndiannessError};
