//! Route handlers

pub mod checkout;
pub mod dashboard;
pub mod health;
pub mod organizations;
pub mod pages;
pub mod register;
