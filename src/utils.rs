pub mod date;
pub mod trace;
