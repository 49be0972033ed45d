pub mod movie;
pub mod review;

pub use movie::*;
pub use review::*;
