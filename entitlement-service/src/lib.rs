//! Entitlement service: decides whether a customer's subscription to a
//! service currently grants access, and how much allowance remains.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
