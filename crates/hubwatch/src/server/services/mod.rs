pub mod engagement;
pub mod generation;
pub mod trends;
