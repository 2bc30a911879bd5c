pub mod core;
pub mod utils;
pub mod books;
pub mod members;
pub mod loans;
pub mod catalog;
