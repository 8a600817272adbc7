pub mod app;
pub mod engine;
pub mod entity;
pub mod inbound;
pub mod outbound;
pub mod repository;
pub mod session;
