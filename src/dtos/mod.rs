// src/dtos/mod.rs
pub mod product;
