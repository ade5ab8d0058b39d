//! HTTP client module

pub mod http;
pub mod profile;

pub use http::{HttpResponse, HttpTransport, ReqwestTransport, DEFAULT_TIMEOUT};
pub use profile::BrowserProfile;
