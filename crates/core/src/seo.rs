//! Generated robots.txt and sitemap.xml documents

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Public pages listed in the sitemap
pub const SITE_ROUTES: &[&str] = &[
    "/",
    "/about",
    "/pricing",
    "/faq",
    "/contact",
    "/mentors",
    "/courses",
    "/courses/stepik",
    "/sessions",
    "/learning",
    "/roadmap",
    "/dashboard",
    "/legal/terms",
    "/legal/privacy",
    "/legal/cookies",
    "/legal/dpa",
    "/legal/refund",
    "/legal/aup",
    "/legal/community",
    "/legal/license",
];

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Allow everything and point crawlers at the sitemap
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nDisallow:\n\nSitemap: {}/sitemap.xml",
        trim_base(base_url)
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Sitemap for `routes` under `base_url`, all stamped with `updated`
pub fn sitemap_xml(base_url: &str, routes: &[&str], updated: DateTime<Utc>) -> String {
    let base = trim_base(base_url);
    let lastmod = updated.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in routes {
        let _ = writeln!(
            xml,
            "    <url>\n      <loc>{}</loc>\n      <lastmod>{lastmod}</lastmod>\n      <changefreq>weekly</changefreq>\n      <priority>0.7</priority>\n    </url>",
            escape_xml(&format!("{base}{path}"))
        );
    }
    xml.push_str("</urlset>");
    xml
}
