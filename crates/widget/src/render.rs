use shared::{domain::PhasedLocus, error::SearchError, protocol::SearchResponse};
use tracing::{debug, error, info, warn};

use crate::{
    context::{AppContext, Region},
    pagination::{info_html, length_menu_html, nav_html, Pager},
};

pub const TABLE_CLASSES: &str = "table table-striped table-bordered";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_row(row: &PhasedLocus, visible: bool) -> String {
    let cells: String = row
        .cell_texts()
        .iter()
        .map(|text| format!("<td>{}</td>", escape_html(text)))
        .collect();
    if visible {
        format!("<tr>{cells}</tr>")
    } else {
        format!("<tr hidden>{cells}</tr>")
    }
}

/// Table markup for `rows`, every row present in the body. Rows outside the
/// pager's current page are marked `hidden`.
pub fn render_table(rows: &[PhasedLocus], pager: &Pager) -> String {
    let header: String = PhasedLocus::COLUMNS
        .iter()
        .map(|column| format!("<th>{column}</th>"))
        .collect();
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(index, row)| render_row(row, pager.is_visible(index, rows.len())))
        .collect();

    format!(
        r#"<table class="{TABLE_CLASSES}" data-page-length="{}"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>"#,
        pager.page_length()
    )
}

/// Renders a completed search into the results region.
///
/// Returns `false` and leaves the page untouched when the response does not
/// carry a success status.
pub fn show_search_result(ctx: &mut AppContext, response: &SearchResponse) -> bool {
    if !response.is_success() {
        warn!(status = %response.status, "Search result status is NOT good!");
        return false;
    }

    let rows = response.rows();
    let pager = *ctx.pager();
    let html = format!(
        "{}{}{}{}",
        length_menu_html(&pager),
        render_table(&rows, &pager),
        info_html(&pager, rows.len()),
        nav_html(&pager, rows.len())
    );
    ctx.set_html(Region::MainResults, html);
    info!(rows = rows.len(), page_length = pager.page_length(), "search results rendered");
    true
}

pub fn show_search_error(err: &SearchError) {
    error!(
        status = err.status(),
        message = err.message(),
        "Search returned error! Status={} Message={}",
        err.status(),
        err.message()
    );
    debug!(?err, "search failure detail");
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
