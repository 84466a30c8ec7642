pub mod notification;
pub mod repository;
