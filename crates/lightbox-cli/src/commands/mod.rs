pub mod config;
pub mod inspect;
pub mod probe;
pub mod visits;
