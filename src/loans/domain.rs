pub mod fine;
pub mod model;
