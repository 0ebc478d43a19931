mod page;
mod prerendered;
mod shell;

pub use page::button_labels;
pub use prerendered::render_prerendered;
pub use shell::render_shell;

use crate::config::ProviderKind;

/// Inline SVG used when a movie has no poster or the image fails to load.
pub const NO_POSTER_SVG: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='300' height='445' viewBox='0 0 300 445'%3E%3Crect width='300' height='445' fill='%231a1a2e'/%3E%3Ctext x='50%25' y='48%25' dominant-baseline='middle' text-anchor='middle' font-family='sans-serif' font-size='16' fill='%23e94560'%3ESin+P%C3%B3ster%3C/text%3E%3C/svg%3E";

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub provider: ProviderKind,
    /// Show the "credential not configured" banner.
    pub missing_credential: bool,
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a value as JSON that is safe to embed inside `<script>`.
pub fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}
