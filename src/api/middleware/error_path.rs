//! Stamps the request path onto JSON error bodies.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::errors::ErrorBody;

/// Re-renders any [`ErrorBody`] response with the URI path of the request.
///
/// Installed on the outer router so nested routes still see the full path.
pub async fn error_path_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    match response.extensions().get::<ErrorBody>().cloned() {
        Some(body) => {
            let (parts, _) = response.into_parts();
            let mut stamped = body.into_response_for(path);
            for (name, value) in parts.headers.iter() {
                if !stamped.headers().contains_key(name) {
                    stamped.headers_mut().insert(name.clone(), value.clone());
                }
            }
            stamped
        }
        None => response,
    }
}
