//! Declarative field extraction.
//!
//! A page type is described by an ordered list of [`FieldRule`]s. Each rule names the
//! field, the CSS selector that finds candidate elements, which candidate to pick, where
//! the raw value comes from and how to clean it. Evaluating the table yields one typed
//! outcome per field: a value, an expected absence (`None`, optional fields only), or an
//! [`ExtractError`] that aborts the page.

use crate::error::{ExtractError, OptionalField};
use crate::extract::html::{attr_of, select_all, text_of};
use scraper::{ElementRef, Html};

pub type Transform = fn(&'static str, String) -> Result<String, ExtractError>;

/// Which of the elements matched by a rule's selector holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locate {
    First,
    Nth(usize),
    /// `index`, or `fallback` when there are not enough matches.
    NthOr { index: usize, fallback: usize },
    /// `index`, but only when at least `min` elements matched.
    NthWhenCount { index: usize, min: usize },
}

impl Locate {
    fn pick<'a>(self, matches: &[ElementRef<'a>]) -> Option<ElementRef<'a>> {
        match self {
            Locate::First => matches.first().copied(),
            Locate::Nth(index) => matches.get(index).copied(),
            Locate::NthOr { index, fallback } => {
                matches.get(index).or_else(|| matches.get(fallback)).copied()
            }
            Locate::NthWhenCount { index, min } if matches.len() >= min => {
                matches.get(index).copied()
            }
            Locate::NthWhenCount { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Text,
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub selector: &'static str,
    pub locate: Locate,
    pub source: Source,
    pub transform: Transform,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector,
            locate: Locate::First,
            source: Source::Text,
            transform: keep,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, selector: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, selector)
        }
    }

    pub const fn locate(self, locate: Locate) -> Self {
        Self { locate, ..self }
    }

    pub const fn attr(self, attr: &'static str) -> Self {
        Self {
            source: Source::Attr(attr),
            ..self
        }
    }

    pub const fn transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    fn evaluate(&self, doc: &Html) -> Result<Option<String>, ExtractError> {
        let outcome = self.raw_value(doc).and_then(|raw| (self.transform)(self.name, raw));
        if self.required {
            outcome.map(Some)
        } else {
            outcome.optional()
        }
    }

    fn raw_value(&self, doc: &Html) -> Result<String, ExtractError> {
        let missing = ExtractError::Missing { field: self.name };
        let matches = select_all(doc, self.selector)?;
        let element = self.locate.pick(&matches).ok_or(missing.clone())?;
        match self.source {
            Source::Text => Ok(text_of(element)),
            Source::Attr(name) => attr_of(element, name).ok_or(missing),
        }
    }
}

pub fn keep(_field: &'static str, value: String) -> Result<String, ExtractError> {
    Ok(value)
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractionTable {
    rules: &'static [FieldRule],
}

impl ExtractionTable {
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, doc: &Html) -> Result<Fields, ExtractError> {
        let values = self
            .rules
            .iter()
            .map(|rule| rule.evaluate(doc).map(|value| (rule.name, value)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fields { values })
    }
}

/// Evaluated values keyed by field name, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: Vec<(&'static str, Option<String>)>,
}

impl Fields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Moves an optional value out.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.values
            .iter_mut()
            .find(|(field, _)| *field == name)
            .and_then(|(_, value)| value.take())
    }

    /// Moves a value out, treating absence as an error.
    pub fn take_required(&mut self, name: &'static str) -> Result<String, ExtractError> {
        self.take(name)
            .ok_or(ExtractError::Missing { field: name })
    }
}
