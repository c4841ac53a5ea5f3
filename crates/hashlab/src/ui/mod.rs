pub mod output;
pub mod table;
pub mod tracker;
