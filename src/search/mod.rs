pub mod cursor;
pub mod results;
pub mod sorter;
