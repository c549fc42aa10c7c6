pub mod device;
pub mod isa;
