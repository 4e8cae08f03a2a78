pub mod records;
pub mod song;
pub mod token;
