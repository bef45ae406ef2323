pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod html;
pub mod page;
pub mod probe;
pub mod viewer;
pub mod visits;
