//! Observability for chatstore: subscriber installation and shutdown.

pub mod tracing_setup;
