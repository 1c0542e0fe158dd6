//! Prometheus registry backing `/v1/metrics`.
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    pub registry: Registry,
    pub trips_planned: IntCounter,
    pub trips_rejected: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let trips_planned = IntCounter::new(
            "eld_trips_planned_total",
            "Trips planned successfully",
        )
        .expect("valid metric definition");
        let trips_rejected = IntCounter::new(
            "eld_trips_rejected_total",
            "Trip requests rejected by validation or HOS rules",
        )
        .expect("valid metric definition");
        registry
            .register(Box::new(trips_planned.clone()))
            .expect("register metric");
        registry
            .register(Box::new(trips_rejected.clone()))
            .expect("register metric");
        Self { registry, trips_planned, trips_rejected }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_appear_in_exposition() {
        let metrics = ApiMetrics::new();
        metrics.trips_planned.inc();
        let text = encode(&metrics.registry).unwrap();
        assert!(text.contains("eld_trips_planned_total 1"));
        assert!(text.contains("eld_trips_rejected_total 0"));
    }
}
