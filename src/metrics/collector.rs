//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta métricas del servidor en tiempo real. El lock se toma solo para
//! actualizar contadores, nunca durante un delay o un render.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Máximo de latencias guardadas para calcular percentiles
const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
#[derive(Default)]
struct MetricsData {
    total_requests: u64,
    status_codes: BTreeMap<u16, u64>,
    requests_per_route: BTreeMap<String, u64>,
    bytes_sent: u64,
    /// Ventana de latencias en microsegundos
    latencies: VecDeque<u64>,
    active_threads: u64,
}

/// Percentiles de latencia en microsegundos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub avg: u64,
    pub samples: usize,
}

/// Snapshot de métricas (lo que expone `/metrics`)
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub active_threads: u64,
    pub bytes_sent: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub requests_per_route: BTreeMap<String, u64>,
    pub latency_us: LatencySummary,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData::default())),
            start_time: Instant::now(),
        }
    }

    // Un thread que hizo panic no debe dejar las métricas inutilizables
    fn lock(&self) -> MutexGuard<'_, MetricsData> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registra un request atendido
    pub fn record_request(&self, route: &str, status_code: u16, bytes: usize, latency: Duration) {
        let mut data = self.lock();

        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        *data.requests_per_route.entry(route.to_string()).or_insert(0) += 1;
        data.bytes_sent += bytes as u64;

        if data.latencies.len() >= MAX_LATENCY_SAMPLES {
            data.latencies.pop_front();
        }
        data.latencies.push_back(latency.as_micros() as u64);
    }

    pub fn increment_active_threads(&self) {
        self.lock().active_threads += 1;
    }

    pub fn decrement_active_threads(&self) {
        let mut data = self.lock();
        data.active_threads = data.active_threads.saturating_sub(1);
    }

    pub fn active_threads(&self) -> u64 {
        self.lock().active_threads
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.lock();

        MetricsSnapshot {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            total_requests: data.total_requests,
            active_threads: data.active_threads,
            bytes_sent: data.bytes_sent,
            status_codes: data.status_codes.clone(),
            requests_per_route: data.requests_per_route.clone(),
            latency_us: summarize(&data.latencies),
        }
    }

    /// Métricas actuales en JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot())
            .unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(latencies: &VecDeque<u64>) -> LatencySummary {
    if latencies.is_empty() {
        return LatencySummary::default();
    }

    let mut sorted: Vec<u64> = latencies.iter().copied().collect();
    sorted.sort_unstable();

    let len = sorted.len();
    let sum: u64 = sorted.iter().sum();

    LatencySummary {
        p50: sorted[len * 50 / 100],
        p95: sorted[len * 95 / 100],
        p99: sorted[len * 99 / 100],
        avg: sum / len as u64,
        samples: len,
    }
}
