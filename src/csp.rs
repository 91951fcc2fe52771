use axum::extract::Request;
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;

const DIRECTIVES: [&str; 8] = [
    "default-src 'self'",
    "script-src 'self'",
    "style-src 'self' 'unsafe-inline' https://fonts.googleapis.com",
    "img-src 'self' https://images.unsplash.com data:",
    "font-src 'self' https://fonts.gstatic.com",
    "connect-src 'self' https://hooks.jdoodle.net https://api.openai.com",
    "frame-src 'none'",
    "object-src 'none'",
];

pub fn content_security_policy() -> String {
    DIRECTIVES.join("; ")
}

// Attach the CSP and the usual hardening headers to every response
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();

    if let Ok(csp) = HeaderValue::from_str(&content_security_policy()) {
        headers.insert(header::CONTENT_SECURITY_POLICY, csp);
    }
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    res
}
