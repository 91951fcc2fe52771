use chrono::NaiveDate;
use std::fmt::Write;

// Page sections, in page order; "" is the home page
pub const SECTIONS: [&str; 6] = ["", "about", "projects", "blog", "tools", "contact"];

/// Renders the sitemap for a single-page site: the home page at priority 1.0
/// and each section as a `#fragment` at 0.8, all changing monthly.
pub fn render(site_url: &str, last_modified: NaiveDate) -> String {
    let base = site_url.trim_end_matches('/');
    let lastmod = last_modified.format("%Y-%m-%d");

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for section in SECTIONS {
        let (loc, priority) = if section.is_empty() {
            (base.to_string(), "1.0")
        } else {
            (format!("{base}/#{section}"), "0.8")
        };
        // writing into a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
             <changefreq>monthly</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
        );
    }

    xml.push_str("</urlset>\n");
    xml
}
