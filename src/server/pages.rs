//! Static HTML pages

use axum::response::Html;

const INDEX_HTML: &str = include_str!("templates/index.html");
const USER_GUIDE_HTML: &str = include_str!("templates/user_guide.html");

/// Main translator page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// User guide page
pub async fn user_guide() -> Html<&'static str> {
    Html(USER_GUIDE_HTML)
}
