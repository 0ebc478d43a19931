use super::{escape_html, script_json, ShellOptions, NO_POSTER_SVG};
use crate::catalog::Category;
use crate::config::ProviderKind;

const BASE_CSS: &str = include_str!("assets/base.css");
const TMDB_CSS: &str = include_str!("assets/theme-tmdb.css");
const OMDB_CSS: &str = include_str!("assets/theme-omdb.css");

fn theme_css(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Tmdb => TMDB_CSS,
        ProviderKind::Omdb => OMDB_CSS,
    }
}

fn provider_site(provider: ProviderKind) -> (&'static str, &'static str) {
    match provider {
        ProviderKind::Tmdb => ("The Movie Database (TMDB)", "https://www.themoviedb.org"),
        ProviderKind::Omdb => ("OMDb API", "https://www.omdbapi.com"),
    }
}

/// `<head>` through the tab bar.
pub(super) fn open(opts: &ShellOptions, categories: &[Category], tab_attr: &str) -> String {
    let provider = opts.provider.display_name();
    let banner = if opts.missing_credential {
        format!(
            r#"<div class="warning" role="alert">{} no está configurada</div>"#,
            opts.provider.credential_var()
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Cine {provider}</title>
  <style>
{base}
{theme}
  </style>
</head>
<body>
  <header>
    <div>
      <h1>&#127916; <span>Cine</span> {provider}</h1>
      <p class="tagline">Películas populares por categoría · Powered by {provider}</p>
    </div>
  </header>
  {banner}
  <nav class="tabs">
{tabs}
  </nav>
"#,
        base = BASE_CSS,
        theme = theme_css(opts.provider),
        tabs = tab_buttons(categories, tab_attr),
    )
}

/// Footer, page globals and the given script, closing the document.
pub(super) fn close(opts: &ShellOptions, default_category: &str, script: &str) -> String {
    let (site_name, site_url) = provider_site(opts.provider);
    format!(
        r#"  <footer>Datos provistos por <a href="{site_url}" target="_blank" rel="noopener noreferrer">{site_name}</a></footer>

  <script>
    const NO_POSTER = {no_poster};
    const DEFAULT_CATEGORY = {default_category};
  </script>
  <script>
{script}
  </script>
</body>
</html>
"#,
        no_poster = script_json(NO_POSTER_SVG),
        default_category = script_json(default_category),
    )
}

/// One button per category, in table order; the first one starts active.
fn tab_buttons(categories: &[Category], tab_attr: &str) -> String {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                r#"    <button class="tab-btn{active}" {tab_attr}="{id}">{name}</button>"#,
                active = if i == 0 { " active" } else { "" },
                id = escape_html(c.id),
                name = escape_html(c.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Labels of the category tab buttons in a rendered page, in document order.
pub fn button_labels(html: &str) -> Vec<String> {
    html.split(r#"<button class="tab-btn"#)
        .skip(1)
        .filter_map(|chunk| {
            let start = chunk.find('>')? + 1;
            let end = chunk.find("</button>")?;
            Some(chunk[start..end].to_string())
        })
        .collect()
}
