//! HTML parsing for the scraped source.
//!
//! Three page shapes are understood:
//!
//! - card pages (`card?ref=<code>`): a link to the set and the art thumbnails,
//! - set checklists (`set_checklist?set=<id>`): one row per printing,
//! - nothing else; unknown markup parses to empty results.

use scraper::{ElementRef, Html, Selector};

/// Inline style of the rows on a set checklist page.
const ROW_STYLE: &str = "display:block;margin:0px 2px 0px 2px;border-top:1px #cccccc dotted;";

/// Inline style of the art thumbnails on a card page.
const THUMB_STYLE: &str = "display:block;border:4px black solid;cursor:pointer;";

/// One printing listed on a set checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Collector number cell.
    pub number: String,
    /// Card-name cell text (may include a variant description).
    pub name_text: String,
    /// Artist cell text, empty when the row has no artist column.
    pub artist_text: String,
    /// Reference code linked from the name cell.
    pub code: String,
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>()
}

/// Strip the card-page prefix from a link (`card?ref=mh2085` -> `mh2085`).
fn code_from_href(href: &str) -> String {
    href.replace("card?ref=", "")
}

/// Extract the checklist link from a card page.
///
/// The set link (`set?set=<id>`) is rewritten to its checklist form
/// (`set_checklist?set=<id>`).
pub fn parse_set_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let cell_sel = selector(r#"td[width="170"][align="center"]"#)?;
    let link_sel = selector("a")?;

    let cell = document.select(&cell_sel).next()?;
    let href = cell.select(&link_sel).next()?.value().attr("href")?;
    Some(href.replace("set?", "set_checklist?"))
}

/// Parse every printing row of a set checklist page.
///
/// Rows without a name cell or without a linked reference code are skipped.
pub fn parse_rows(html: &str) -> Vec<ListingRow> {
    let document = Html::parse_document(html);
    let (Some(row_sel), Some(cell_sel), Some(link_sel)) = (
        selector(&format!(r#"div[style="{ROW_STYLE}"]"#)),
        selector("td"),
        selector("a"),
    ) else {
        return Vec::new();
    };

    document
        .select(&row_sel)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            let name_cell = cells.get(2)?;
            let href = name_cell.select(&link_sel).next()?.value().attr("href")?;
            Some(ListingRow {
                number: cells.first().map(cell_text).unwrap_or_default(),
                name_text: cell_text(name_cell),
                artist_text: cells.get(6).map(cell_text).unwrap_or_default(),
                code: code_from_href(href),
            })
        })
        .collect()
}

/// Collect the `src` of every art thumbnail on a card page, in page order.
pub fn parse_image_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(img_sel) = selector(&format!(r#"img[style="{THUMB_STYLE}"]"#)) else {
        return Vec::new();
    };

    document
        .select(&img_sel)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect()
}
