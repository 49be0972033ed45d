pub mod posters;
pub mod rating;
pub mod reviews;
pub mod storage;
