//! Cache-control policies for HTTP responses.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Client records hold personal health data; shared caches must not keep them.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Probe answers describe the current instant only.
pub const NO_STORE: &str = "no-store";

/// Header tuple for responses carrying client records.
pub const fn private_no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_STORE)
}

/// Header tuple for health probe responses.
pub const fn no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}
