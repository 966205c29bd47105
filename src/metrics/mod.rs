//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Recolección y agregación de métricas del servidor:
//! - Contadores de requests por ruta y por código de estado
//! - Bytes enviados
//! - Latencias (p50, p95, p99)
//! - Threads activos

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
