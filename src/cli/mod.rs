pub mod commands;
pub mod context;
pub mod devices;
pub mod parser;
pub mod view;
