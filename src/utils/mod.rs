mod errors;
pub mod random;

pub use errors::Error;
