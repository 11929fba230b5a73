pub mod domain;
pub mod error;
pub mod materials;
pub mod protocol;
