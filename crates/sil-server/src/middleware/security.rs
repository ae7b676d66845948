//! Security response headers.
//!
//! The Content-Security-Policy only allows same-origin scripts. Inline
//! styles stay allowed because rendered markdown can carry them. Production
//! sites served over https also upgrade insecure subresource requests.

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::SiteInfo;

/// Policy directives in header order.
const DIRECTIVES: [(&str, &str); 9] = [
    ("default-src", "'self'"),
    ("script-src", "'self'"),
    ("style-src", "'self' 'unsafe-inline'"),
    ("font-src", "'self' data:"),
    ("img-src", "'self' data: https:"),
    ("connect-src", "'self'"),
    ("base-uri", "'self'"),
    ("form-action", "'self'"),
    ("frame-ancestors", "'none'"),
];

/// Content-Security-Policy value for a site.
pub(crate) fn content_security_policy(info: &SiteInfo) -> String {
    let mut directives: Vec<String> = DIRECTIVES
        .iter()
        .map(|(name, sources)| format!("{name} {sources}"))
        .collect();
    if !info.staging && info.base_url.starts_with("https://") {
        directives.push("upgrade-insecure-requests".to_owned());
    }
    directives.join("; ")
}

/// Sets the site's Content-Security-Policy on every response.
///
/// A policy that is not a valid header value is logged and left off.
pub(crate) fn csp_layer(info: &SiteInfo) -> SetResponseHeaderLayer<Option<HeaderValue>> {
    let value = HeaderValue::try_from(content_security_policy(info))
        .inspect_err(|e| tracing::error!(error = %e, "Invalid Content-Security-Policy"))
        .ok();
    SetResponseHeaderLayer::overriding(header::CONTENT_SECURITY_POLICY, value)
}

pub(crate) fn nosniff_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    )
}

/// Pages are never framed, matching `frame-ancestors 'none'`.
pub(crate) fn deny_framing_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"))
}
