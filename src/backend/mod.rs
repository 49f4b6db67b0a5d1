//! Backend access: configuration, voice listing and synthesis over HTTP.

mod client;
pub mod query;
mod types;

pub use client::{BackendClient, BackendClientBuilder};
pub use types::{
    base_filename, headers, parse_sample_rate, Facets, HealthStatus, RemoteConfig, SynthesisMetadata,
    SynthesisRequest, SynthesisResult, Voice, VoiceMetadata, VoicesResponse, DEFAULT_MODEL,
    DEFAULT_FILENAME, DEFAULT_SAMPLE_RATE, ENCODING,
};
