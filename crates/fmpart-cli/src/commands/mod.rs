pub mod hash;
pub mod partition;
pub mod version;
