pub mod attendance;
pub mod calculator;
pub mod issue;
pub mod ports;
pub mod routes;
pub mod scan;
pub mod session;
pub mod storage;
