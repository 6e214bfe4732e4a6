//! Backend de gestión de alquiler de coches
//!
//! API HTTP con autorización por roles sobre tres colecciones
//! (coches, usuarios, alquileres). El núcleo es el ciclo de vida del
//! alquiler: reserva con cálculo de precio, transición consistente de
//! estado entre coche y alquiler, y finalización que la revierte.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
