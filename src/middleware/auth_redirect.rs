use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

/// Replace JSON 401 bodies on HTML admin pages with a plain login hint.
pub async fn admin_login_hint(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() == StatusCode::UNAUTHORIZED {
        (
            StatusCode::UNAUTHORIZED,
            Html("<p>Admin token required. Set the <code>admin_token</code> cookie.</p>"),
        )
            .into_response()
    } else {
        response
    }
}
