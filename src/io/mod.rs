//! # IO Module
//!
//! The interface layer between HTTP clients and the domain logic: REST
//! handlers, wire DTOs, and the domain-to-DTO mappers.

pub mod rest;
