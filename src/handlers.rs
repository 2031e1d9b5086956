pub mod health;
pub mod projects;
pub mod team;
pub mod transactions;
