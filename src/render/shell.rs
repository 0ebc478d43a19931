use super::{page, ShellOptions};
use crate::catalog::Catalog;

const APP_JS: &str = include_str!("assets/app.js");

const DETAILS_DIALOG: &str = r##"  <div id="details" class="modal" hidden>
    <div class="modal-card" role="dialog" aria-modal="true">
      <div class="modal-poster" id="details-poster"></div>
      <div class="modal-body">
        <div class="modal-head">
          <div>
            <h2 id="details-title"></h2>
            <p class="modal-subtitle" id="details-subtitle"></p>
          </div>
          <button class="close-btn" id="details-close" aria-label="Cerrar">&times;</button>
        </div>
        <dl class="detail-grid" id="details-facts"></dl>
        <p class="modal-overview" id="details-overview"></p>
        <a class="source-link" id="details-link" href="#" target="_blank" rel="noopener noreferrer">Ver ficha completa</a>
      </div>
    </div>
  </div>
"##;

/// Static page: tabs plus an empty grid that the browser fills from
/// `/api/movies` one category at a time.
pub fn render_shell(catalog: &Catalog, opts: &ShellOptions) -> String {
    let mut html = page::open(opts, catalog.categories(), "data-id");
    html.push_str(
        r#"  <main>
    <div class="panel">
      <div id="grid" class="grid"><p class="status">Cargando...</p></div>
    </div>
  </main>
"#,
    );
    html.push_str(DETAILS_DIALOG);
    html.push_str(&page::close(opts, catalog.default_category().id, APP_JS));
    html
}
