//! HTTP abstraction for testable remote lookups

mod client;
mod mock;
mod real;

pub use client::{Header, HttpClient, HttpResponse};
pub use mock::{MockHttpClient, RecordedRequest};
pub use real::ReqwestHttpClient;
