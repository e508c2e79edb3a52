pub mod controllers;
pub mod error;

pub use error::Error;
