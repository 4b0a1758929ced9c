//! HTML pages.
//!
//! `/pay` is the shareable payment page: it embeds the Open Graph /
//! Farcaster meta tags that make a posted link unfurl into the preview
//! card. The send/history pages are thin shells gated by the wallet guard.
//! All caller-supplied text reaches markup through the escaping builder.

use axum::extract::{Query, RawQuery, State};
use axum::http::header;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::card::CardContent;
use crate::html::PageBuilder;
use crate::middleware::wallet_guard;
use crate::models::AppState;

const PAGE_CACHE_CONTROL: &str = "no-cache";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Debug, Deserialize)]
pub struct PayParams {
    amount: Option<String>,
    currency: Option<String>,
    description: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/pay", get(payment_page))
        .route("/send", get(send_page))
        .route("/send/confirm", get(confirm_page))
        .route("/history", get(history_page))
        .route_layer(from_fn_with_state(state.clone(), wallet_guard))
        .with_state(state)
}

fn html_page(body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
            (header::CACHE_CONTROL, PAGE_CACHE_CONTROL),
        ],
        body,
    )
}

async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let app_name = &state.config.branding.app_name;
    let page = PageBuilder::new(app_name)
        .heading(app_name)
        .paragraph("Send stablecoins to anyone with a payment link.")
        .raw_section(r#"    <div id="app" data-page="index"></div>"#)
        .render();
    html_page(page)
}

async fn payment_page(
    State(state): State<AppState>,
    Query(params): Query<PayParams>,
    RawQuery(raw_query): RawQuery,
) -> impl IntoResponse {
    let content = CardContent::from_params(params.amount, params.currency, params.description);
    let branding = &state.config.branding;

    let query = raw_query.map(|q| format!("?{}", q)).unwrap_or_default();
    let page_url = format!("{}/pay{}", branding.base_url, query);
    let image_url = format!("{}/api/og{}", branding.base_url, query);

    let title = format!("{} - {}", branding.app_name, content.headline());
    let mut page = PageBuilder::new(&title)
        .meta_property("og:title", &title)
        .meta_property("og:description", &content.description)
        .meta_property("og:image", &image_url)
        .meta_property("og:url", &page_url)
        .meta_property("fc:frame:image", &image_url)
        .heading(&content.headline())
        .paragraph(&content.description)
        .data_row("Amount", &content.headline());

    // Best-effort fee row; an unparseable amount falls back to the bare page.
    if let Ok(amount) = Decimal::from_str(&content.amount) {
        if let Ok(quote) = state.fees.quote(amount) {
            page = page
                .data_row("Fee", &format!("{} {}", quote.fee_amount, content.currency))
                .data_row("Total", &format!("{} {}", quote.total, content.currency));
        }
    }

    html_page(page.render())
}

async fn send_page(State(state): State<AppState>) -> impl IntoResponse {
    shell_page(&state, "Send", r#"    <div id="app" data-page="send"></div>"#)
}

async fn confirm_page(State(state): State<AppState>) -> impl IntoResponse {
    shell_page(
        &state,
        "Confirm payment",
        r#"    <div id="app" data-page="confirm"></div>"#,
    )
}

async fn history_page(State(state): State<AppState>) -> impl IntoResponse {
    shell_page(
        &state,
        "Payment history",
        r#"    <div id="app" data-page="history"></div>"#,
    )
}

fn shell_page(state: &AppState, title: &str, section: &'static str) -> impl IntoResponse {
    let full_title = format!("{} - {}", state.config.branding.app_name, title);
    let body = PageBuilder::new(&full_title)
        .heading(title)
        .raw_section(section)
        .render();
    html_page(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_page(uri: &str, cookie: Option<&str>, referer: Option<&str>) -> (StatusCode, String, Option<String>) {
        let state = test_state("http://settlement.invalid", "http://farcaster.invalid");
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(referer) = referer {
            builder = builder.header(header::REFERER, referer);
        }
        let response = router(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap(), location)
    }

    #[tokio::test]
    async fn payment_page_embeds_preview_metadata() {
        let (status, body, _) =
            get_page("/pay?amount=12.50&currency=USDC&description=Lunch", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("12.50 USDC"));
        assert!(body.contains(
            "property=\"og:image\" content=\"https://pay.example.com/api/og?amount=12.50&amp;currency=USDC&amp;description=Lunch\""
        ));
        assert!(body.contains("property=\"fc:frame:image\""));
        // fee row from the tier table: 12.50 @ 1.0% = 0.13
        assert!(body.contains("0.13 USDC"));
    }

    #[tokio::test]
    async fn payment_page_escapes_user_input() {
        let (status, body, _) =
            get_page("/pay?description=%3Cscript%3Ealert(1)%3C/script%3E", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<script>alert"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn payment_page_defaults_when_params_are_absent() {
        let (status, body, _) = get_page("/pay", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("0.00 USDC"));
        assert!(body.contains("Payment request"));
    }

    #[tokio::test]
    async fn payment_page_is_not_cacheable() {
        let state = test_state("http://settlement.invalid", "http://farcaster.invalid");
        let response = router(state)
            .oneshot(Request::builder().uri("/pay").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            PAGE_CACHE_CONTROL
        );
    }

    #[tokio::test]
    async fn guarded_page_redirects_without_a_wallet() {
        let (status, _, location) = get_page("/send", None, None).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/?connect=required"));
    }

    #[tokio::test]
    async fn guarded_page_opens_with_a_wallet_cookie() {
        let (status, body, _) = get_page("/send", Some("wallet_connected=true"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Send"));
    }

    #[tokio::test]
    async fn confirm_page_honors_the_referrer_carve_out() {
        let (status, _, _) = get_page(
            "/send/confirm",
            None,
            Some("https://pay.example.com/send"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, location) = get_page("/send/confirm", None, None).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/?connect=required"));
    }

    #[tokio::test]
    async fn index_is_open_regardless_of_cookie() {
        let (status, _, _) = get_page("/?connect=required", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
