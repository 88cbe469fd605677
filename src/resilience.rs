pub mod backoff;
pub mod freshness;
pub mod schedule;
