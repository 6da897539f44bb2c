// src/repositories/mod.rs
pub mod product;
