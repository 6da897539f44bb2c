// src/services/mod.rs
pub mod product;
