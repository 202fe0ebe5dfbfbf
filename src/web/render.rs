//! HTML rendering of the explorer page.

use crate::config::{MAX_TOP_N, MIN_TOP_N, TOP_N_STEP};
use crate::presentation::{ExpirySection, ExpiryTable, ExplorerView, Notice, NoticeLevel};
use crate::quotes::Strategy;
use std::fmt::Write;

const PREMIUM_COLUMN: usize = 1;

const TITLE: &str = "Option Income APR Explorer";

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;max-width:72rem}\
table{border-collapse:collapse;margin:.5rem 0 1.5rem}\
th,td{padding:.25rem .75rem;border-bottom:1px solid #ddd;text-align:right}\
.notice{padding:.5rem .75rem;margin:.5rem 0;border-radius:4px}\
.info{background:#e8f0fe}.warning{background:#fff4e5}\
.metric{font-size:1.5rem;font-weight:600}.caption{color:#555}\
form{display:flex;gap:1.5rem;flex-wrap:wrap;align-items:flex-end}";

/// Escapes text for HTML element and attribute content.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Full HTML document for one view.
#[must_use]
pub fn render_page(view: &ExplorerView) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>{TITLE}</h1>\
         <p>Enter an equity ticker to view annualized returns for covered calls or cash-secured puts.</p>"
    );

    render_form(&mut html, view);

    for notice in &view.notices {
        render_notice(&mut html, notice);
    }

    if let Some(price) = view.underlying_price_label() {
        let _ = write!(
            html,
            "<div>Underlying Price</div><div class=\"metric\">{}</div>",
            escape(&price)
        );
    }
    if let Some(caption) = &view.apr_caption {
        let _ = write!(html, "<p class=\"caption\">{}</p>", escape(caption));
    }

    if view.has_results() {
        for section in &view.sections {
            match section {
                ExpirySection::Table(table) => render_table(&mut html, table),
                ExpirySection::Empty { notice, .. } => render_notice(&mut html, notice),
            }
        }
    }

    html.push_str("</body></html>");
    html
}

fn render_form(html: &mut String, view: &ExplorerView) {
    let request = &view.request;
    html.push_str("<form method=\"get\" action=\"/\"><fieldset><legend>Strategy</legend>");
    for strategy in Strategy::ALL {
        let checked = if strategy == request.strategy {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"strategy\" value=\"{}\"{checked}> {}</label> ",
            strategy.as_str(),
            strategy.name()
        );
    }
    let _ = write!(
        html,
        "</fieldset>\
         <label>Underlying symbol <input type=\"text\" name=\"symbol\" value=\"{}\"></label>\
         <label>Show top N by APR <input type=\"number\" name=\"top_n\" value=\"{}\" \
         min=\"{MIN_TOP_N}\" max=\"{MAX_TOP_N}\" step=\"{TOP_N_STEP}\"></label>",
        escape(&request.symbol),
        request.top_n.get()
    );

    if !view.expiry_options.is_empty() {
        let size = view.expiry_options.len().min(8);
        let _ = write!(
            html,
            "<label>Option expiries <select name=\"expiries\" multiple size=\"{size}\">"
        );
        for option in &view.expiry_options {
            let selected = if option.selected { " selected" } else { "" };
            let _ = write!(
                html,
                "<option value=\"{}\"{selected}>{}</option>",
                escape(&option.value),
                escape(&option.label)
            );
        }
        let _ = write!(
            html,
            "</select></label><input type=\"hidden\" name=\"submitted\" value=\"{}\">",
            escape(&request.symbol)
        );
    }

    html.push_str("<button type=\"submit\">Load quotes</button></form>");
}

fn render_notice(html: &mut String, notice: &Notice) {
    let class = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
    };
    let _ = write!(
        html,
        "<div class=\"notice {class}\">{}</div>",
        escape(&notice.message)
    );
}

fn render_table(html: &mut String, table: &ExpiryTable) {
    let _ = write!(html, "<h3>{}</h3><table><thead><tr>", escape(&table.title()));
    for header in ExpiryTable::HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr></thead><tbody>");
    for (row, cells) in table.rows.iter().zip(table.cells()) {
        html.push_str("<tr>");
        for (i, cell) in cells.iter().enumerate() {
            if i == PREMIUM_COLUMN {
                let _ = write!(
                    html,
                    "<td title=\"from {}\">{}</td>",
                    row.premium_source,
                    escape(cell)
                );
            } else {
                let _ = write!(html, "<td>{}</td>", escape(cell));
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}
