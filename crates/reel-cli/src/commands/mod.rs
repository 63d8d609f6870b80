pub mod search;
pub mod ui;
