pub mod action;
pub mod event;
pub mod id;
pub mod location;
pub mod qr;
pub mod session;
pub mod status;
pub mod summary;
