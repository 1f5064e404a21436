use std::sync::LazyLock;

use crate::types::{BIRTH_DATE_KEY, DEATH_DATE_KEY, ExtractedRecord, FactMapping, FactValue};

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required element: {0}")]
    MissingElement(String),
}

/// Infobox label whose value cell carries the machine-readable birth date.
const BIRTH_LABEL: &str = "Born";
/// Infobox label whose value cell carries the machine-readable death date.
const DEATH_LABEL: &str = "Died";

static RE_MACHINE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid regex: machine date"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts one subject's record from a rendered article page: the lead
/// paragraph plus the parsed infobox. Fails atomically: if either the lead
/// paragraph or the infobox cannot be located there is no partial record,
/// because downstream rendering assumes a lead paragraph exists.
pub fn extract_record(html: &str) -> Result<ExtractedRecord, ParseError> {
    let document = Html::parse_document(html);

    let body_selector = Selector::parse("#bodyContent").unwrap();
    let body = document
        .select(&body_selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement("#bodyContent".to_string()))?;

    // First <p> not flagged by the article's own empty-element convention.
    // Some articles insert decorative empty paragraphs before real prose.
    let p_selector = Selector::parse("p").unwrap();
    let first_paragraph = body
        .select(&p_selector)
        .find(|p| {
            p.value()
                .attr("class")
                .is_none_or(|c| !c.split_whitespace().any(|class| class == "mw-empty-elt"))
        })
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingElement("lead paragraph".to_string()))?;

    let tbody_selector = Selector::parse("table.infobox tbody").unwrap();
    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement("infobox table".to_string()))?;

    let infobox = parse_infobox(tbody);

    Ok(ExtractedRecord {
        first_paragraph,
        infobox,
    })
}

/// Parses the infobox body into a label -> value mapping. Never fails as a
/// whole: every row either contributes an entry or is skipped, and a
/// malformed row can only ever lose itself, not its siblings.
pub fn parse_infobox(tbody: ElementRef) -> FactMapping {
    let row_selector = Selector::parse("tr").unwrap();
    let mut facts = FactMapping::new();

    for row in tbody.select(&row_selector) {
        // Header-only and value-only rows are section separators. Skip.
        let Some((label, value, cell)) = parse_row(row) else {
            continue;
        };

        match label.as_str() {
            BIRTH_LABEL => {
                enrich_with_date(&mut facts, BIRTH_DATE_KEY, machine_birth_date(cell));
            }
            DEATH_LABEL => {
                enrich_with_date(&mut facts, DEATH_DATE_KEY, machine_death_date(cell));
            }
            _ => {}
        }

        // Last write wins when an article repeats a label.
        facts.insert(label, value);
    }

    facts
}

/// A row counts only if it has both a header and a value cell. Returns the
/// label, the shaped value, and the value cell for field-specific enrichment.
fn parse_row(row: ElementRef<'_>) -> Option<(String, FactValue, ElementRef<'_>)> {
    let header_selector = Selector::parse("th").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let header = row.select(&header_selector).next()?;
    let cell = row.select(&cell_selector).next()?;

    let label = normalize_whitespace(&elem_text(header));
    Some((label, cell_value(cell), cell))
}

/// Shape recognition: a cell holding a nested list becomes one value per
/// list item in document order, anything else becomes flattened text.
/// A list kept as a formatting artifact stays a list; consumers handle both.
fn cell_value(cell: ElementRef) -> FactValue {
    let item_selector = Selector::parse("ul li").unwrap();
    let items: Vec<String> = cell
        .select(&item_selector)
        .map(|item| normalize_whitespace(&elem_text(item)))
        .collect();

    if items.is_empty() {
        FactValue::Text(normalize_whitespace(&elem_text(cell)))
    } else {
        FactValue::List(items)
    }
}

/// The Born cell nests the machine-readable date in a dedicated element,
/// rendered inline as `YYYY-MM-DD`.
fn machine_birth_date(cell: ElementRef) -> Option<String> {
    let bday_selector = Selector::parse("span.bday").unwrap();
    let date = elem_text(cell.select(&bday_selector).next()?);
    Some(date.trim().to_string())
}

/// The Died cell renders an age as its visible text and hides the machine
/// date in its first nested span, wrapped in one decoration character on
/// each side, e.g. `(1934-07-04)`. Strip exactly one of each.
fn machine_death_date(cell: ElementRef) -> Option<String> {
    let span_selector = Selector::parse("span").unwrap();
    let wrapped = elem_text(cell.select(&span_selector).next()?);
    let wrapped = wrapped.trim();

    let mut inner = wrapped.chars();
    inner.next()?;
    inner.next_back()?;
    Some(inner.as_str().to_string())
}

/// Stores a derived date key when the candidate looks like `YYYY-MM-DD`.
/// Enrichment failure only loses the derived key; the raw row survives.
fn enrich_with_date(facts: &mut FactMapping, key: &str, candidate: Option<String>) {
    match candidate {
        Some(date) if RE_MACHINE_DATE.is_match(&date) => {
            facts.insert(key.to_string(), FactValue::Text(date));
        }
        Some(date) => log::warn!("Skipping {}: '{}' is not a YYYY-MM-DD date", key, date),
        None => log::warn!("Skipping {}: no machine-readable date element", key),
    }
}
