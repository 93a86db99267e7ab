use crate::error::ExtractError;
use scraper::{ElementRef, Html, Selector};

pub fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css,
        reason: format!("{:?}", e),
    })
}

pub fn select_all<'a>(
    doc: &'a Html,
    css: &'static str,
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(doc.select(&selector).collect())
}

pub fn select_first<'a>(
    doc: &'a Html,
    css: &'static str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(doc.select(&selector).next())
}

pub fn select_first_within<'a>(
    element: ElementRef<'a>,
    css: &'static str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(element.select(&selector).next())
}

/// Concatenation of every text node under `element`, untouched.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn attr_of(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
