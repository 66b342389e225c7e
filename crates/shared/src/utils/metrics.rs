use crate::model::LookupKind;
use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::fmt;

const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// What a service call touched.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Resource {
    Auth,
    Product,
    Category,
    Location,
    Sync,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Auth => "auth",
            Resource::Product => "product",
            Resource::Category => "category",
            Resource::Location => "location",
            Resource::Sync => "sync",
        }
    }
}

impl From<LookupKind> for Resource {
    fn from(kind: LookupKind) -> Self {
        match kind {
            LookupKind::Category => Resource::Category,
            LookupKind::Location => Resource::Location,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub resource: Resource,
    pub method: Method,
    pub status: Status,
}

/// Request counter and latency histogram shared by every service.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(DURATION_BUCKETS.into_iter())
            }),
        }
    }

    pub fn record(&self, labels: Labels, duration_secs: f64) {
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    pub fn count(&self, labels: &Labels) -> u64 {
        self.request_counter.get_or_create(labels).get()
    }
}
