//! Wallet-connection route guard.
//!
//! Paths under a configured prefix set require a truthy `wallet_connected`
//! cookie; everything else passes through untouched. An unconnected request
//! to a guarded path is redirected to the application root with a query
//! marker so the front-end can prompt for a connection. Guard evaluation
//! never fails: a missing or malformed cookie header means "not connected".

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::info;

use crate::config::GuardConfig;
use crate::models::AppState;

pub const CONNECT_COOKIE: &str = "wallet_connected";
pub const REDIRECT_TARGET: &str = "/?connect=required";

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

pub async fn wallet_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let decision = {
        let cookie = req
            .headers()
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok());
        let referer = req
            .headers()
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok());
        evaluate(
            &state.config.guard,
            &state.config.branding.base_url,
            req.uri().path(),
            cookie,
            referer,
        )
    };

    match decision {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(target) => {
            info!(path = %req.uri().path(), "redirecting wallet-less request");
            Redirect::temporary(target).into_response()
        }
    }
}

/// Pure guard decision. Open paths are always allowed regardless of cookie
/// state; the configured exempt path is allowed without a cookie when the
/// referrer is same-origin (internal navigation must not bounce through the
/// connect redirect).
pub fn evaluate(
    guard: &GuardConfig,
    base_url: &str,
    path: &str,
    cookie_header: Option<&str>,
    referer: Option<&str>,
) -> GuardDecision {
    let guarded = guard
        .protected_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()));
    if !guarded {
        return GuardDecision::Allow;
    }

    if wallet_connected(cookie_header) {
        return GuardDecision::Allow;
    }

    if path == guard.referrer_exempt_path && is_same_origin(referer, base_url) {
        return GuardDecision::Allow;
    }

    GuardDecision::Redirect(REDIRECT_TARGET)
}

fn wallet_connected(cookie_header: Option<&str>) -> bool {
    matches!(
        cookie_value(cookie_header, CONNECT_COOKIE),
        Some("true") | Some("1")
    )
}

fn cookie_value<'a>(cookie_header: Option<&'a str>, name: &str) -> Option<&'a str> {
    cookie_header?
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key.trim() == name).then(|| value.trim()))
}

fn is_same_origin(referer: Option<&str>, base_url: &str) -> bool {
    let base = base_url.trim_end_matches('/');
    match referer {
        Some(r) => r == base || r.strip_prefix(base).is_some_and(|rest| rest.starts_with('/')),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pay.example.com";

    fn guard_config() -> GuardConfig {
        GuardConfig {
            protected_prefixes: vec!["/send".to_string(), "/history".to_string()],
            referrer_exempt_path: "/send/confirm".to_string(),
        }
    }

    #[test]
    fn open_paths_always_allowed() {
        let cfg = guard_config();
        for cookie in [None, Some("wallet_connected=false"), Some("garbage")] {
            assert_eq!(evaluate(&cfg, BASE, "/", cookie, None), GuardDecision::Allow);
            assert_eq!(evaluate(&cfg, BASE, "/pay", cookie, None), GuardDecision::Allow);
            assert_eq!(
                evaluate(&cfg, BASE, "/api/health", cookie, None),
                GuardDecision::Allow
            );
        }
    }

    #[test]
    fn guarded_path_requires_cookie() {
        let cfg = guard_config();
        assert_eq!(
            evaluate(&cfg, BASE, "/send", None, None),
            GuardDecision::Redirect(REDIRECT_TARGET)
        );
        assert_eq!(
            evaluate(&cfg, BASE, "/send", Some("wallet_connected=true"), None),
            GuardDecision::Allow
        );
        assert_eq!(
            evaluate(&cfg, BASE, "/history", Some("wallet_connected=1"), None),
            GuardDecision::Allow
        );
    }

    #[test]
    fn falsy_or_malformed_cookie_means_not_connected() {
        let cfg = guard_config();
        for cookie in [
            "wallet_connected=false",
            "wallet_connected=",
            "wallet_connected",
            "other=true",
            ";;;=;;",
        ] {
            assert_eq!(
                evaluate(&cfg, BASE, "/send", Some(cookie), None),
                GuardDecision::Redirect(REDIRECT_TARGET),
                "cookie {:?} should not open the guard",
                cookie
            );
        }
    }

    #[test]
    fn cookie_is_found_among_others() {
        let cfg = guard_config();
        assert_eq!(
            evaluate(
                &cfg,
                BASE,
                "/send",
                Some("theme=dark; wallet_connected=true; lang=en"),
                None
            ),
            GuardDecision::Allow
        );
    }

    #[test]
    fn exempt_path_allows_same_origin_referrer() {
        let cfg = guard_config();
        assert_eq!(
            evaluate(
                &cfg,
                BASE,
                "/send/confirm",
                None,
                Some("https://pay.example.com/send")
            ),
            GuardDecision::Allow
        );
    }

    #[test]
    fn exempt_path_still_guards_foreign_referrers() {
        let cfg = guard_config();
        assert_eq!(
            evaluate(&cfg, BASE, "/send/confirm", None, Some("https://evil.example.com/")),
            GuardDecision::Redirect(REDIRECT_TARGET)
        );
        // prefix trick: same string prefix but different host
        assert_eq!(
            evaluate(
                &cfg,
                BASE,
                "/send/confirm",
                None,
                Some("https://pay.example.com.evil.com/send")
            ),
            GuardDecision::Redirect(REDIRECT_TARGET)
        );
        assert_eq!(
            evaluate(&cfg, BASE, "/send/confirm", None, None),
            GuardDecision::Redirect(REDIRECT_TARGET)
        );
    }

    #[test]
    fn exemption_is_limited_to_the_configured_path() {
        let cfg = guard_config();
        assert_eq!(
            evaluate(&cfg, BASE, "/send", None, Some("https://pay.example.com/")),
            GuardDecision::Redirect(REDIRECT_TARGET)
        );
    }

    #[test]
    fn cookie_parsing_handles_whitespace() {
        assert_eq!(
            cookie_value(Some(" a = 1 ; wallet_connected = true "), CONNECT_COOKIE),
            Some("true")
        );
        assert_eq!(cookie_value(None, CONNECT_COOKIE), None);
    }
}
