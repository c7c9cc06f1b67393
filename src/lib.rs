pub mod cli;
pub mod client;
pub mod container;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod persist;
pub mod render;
pub mod response;
