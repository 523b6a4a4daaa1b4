pub mod domain;
pub mod events;
pub mod factory;
pub mod repository;
