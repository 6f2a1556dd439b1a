pub mod day_10;
pub mod day_12;
