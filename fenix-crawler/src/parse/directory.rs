//! Parser for the `/horarios` listing page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::model::LineLink;

use super::error::StructureError;

// Selector literals are static and known-valid; parsing them cannot fail.
static LINE_TYPE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.col-sm-4").expect("static selector"));
static BLOCK_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("static selector"));
static LINE_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul").expect("static selector"));
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("static selector"));
static ITEM_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Parse the listing page into one [`LineLink`] per line, in document order.
///
/// Each `div.col-sm-4` block groups the lines of one type: its `h4` heading
/// names the type and each `li` of its `ul` links one line's detail page.
/// A block missing its heading, list, anchor or `href` is a structure
/// error; a page with no blocks at all is an empty (valid) directory.
pub fn parse_directory(html: &str) -> Result<Vec<LineLink>, StructureError> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for block in document.select(&LINE_TYPE_BLOCK) {
        let line_type: String = block
            .select(&BLOCK_HEADING)
            .next()
            .ok_or(StructureError::MissingElement("h4 heading in line-type block"))?
            .text()
            .collect();

        let list = block
            .select(&LINE_LIST)
            .next()
            .ok_or(StructureError::MissingElement("ul in line-type block"))?;

        for item in list.select(&LIST_ITEM) {
            let anchor = item
                .select(&ITEM_ANCHOR)
                .next()
                .ok_or(StructureError::MissingElement("a in line list item"))?;
            let href = anchor.value().attr("href").ok_or(StructureError::MissingAttribute {
                element: "a",
                attribute: "href",
            })?;

            links.push(LineLink {
                line_type: line_type.clone(),
                link: href.to_string(),
            });
        }
    }

    Ok(links)
}
