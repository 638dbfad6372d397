//! The catalog of generator modules

pub mod clock_recovery;
