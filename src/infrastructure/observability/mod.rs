//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    init_metrics, record_answer, record_http_request, record_rebuild, record_search,
    set_index_chunks, PrometheusMetrics,
};
