//! Ordered literal link rewrites for proxied dashboard pages.

use crate::routing::address::PROXY_MARKER;

/// Inputs for rewriting one fetched page.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    /// Host the page was just fetched from; re-embedded into its links.
    pub target_host: &'a str,

    /// Externally reachable master address (the configured default host).
    pub default_host: &'a str,

    /// Internal address string the dashboard prints for its master.
    pub master_address: &'a str,
}

/// Rewrite every link in `page` so it routes back through the proxy.
///
/// The replacement order is fixed:
/// 1. the internal master address becomes the external one; the dashboard
///    sometimes prints its own address as a display string, not a link;
/// 2. root-relative `href` targets gain the `/proxy:<host>` prefix;
/// 3. the `href="log` relative-link convention of the log-viewer pages gains
///    the same prefix;
/// 4. absolute `href="http://` targets drop the scheme, so the host that
///    follows becomes the embedded target host;
/// 5. root-relative `src` targets are treated like rule 2;
/// 6. form `action` targets are prefixed unconditionally.
pub fn rewrite_links(page: &str, ctx: &RewriteContext<'_>) -> String {
    let target = ctx.target_host;

    let page = page.replace(ctx.master_address, ctx.default_host);
    let page = page.replace("href=\"/", &format!("href=\"{PROXY_MARKER}{target}/"));
    let page = page.replace("href=\"log", &format!("href=\"{PROXY_MARKER}{target}/log"));
    let page = page.replace("href=\"http://", &format!("href=\"{PROXY_MARKER}"));
    let page = page.replace("src=\"/", &format!("src=\"{PROXY_MARKER}{target}/"));
    page.replace("action=\"", &format!("action=\"{PROXY_MARKER}{target}/"))
}
