//! Page-load hydration of server-rendered counters.
//!
//! The server renders raw counts into `data-review-count` and
//! `data-quantity-sold` attributes; on load each counter's visible text is
//! replaced by its compact form.

/// Which counter an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// `.rating[data-review-count]` → `.formatted-review-count`
    ReviewCount,
    /// `.sold-count[data-quantity-sold]` → `.formatted-quantity-sold`
    QuantitySold,
}

impl StatKind {
    /// Attribute holding the raw value.
    pub fn attribute(&self) -> &'static str {
        match self {
            StatKind::ReviewCount => "data-review-count",
            StatKind::QuantitySold => "data-quantity-sold",
        }
    }

    /// Class of the child element whose text receives the formatted value.
    pub fn target_class(&self) -> &'static str {
        match self {
            StatKind::ReviewCount => "formatted-review-count",
            StatKind::QuantitySold => "formatted-quantity-sold",
        }
    }
}

/// A counter element found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatElement {
    pub kind: StatKind,
    /// Raw attribute value; `None` when the attribute is missing.
    pub raw: Option<String>,
    /// Visible text, rewritten by [`hydrate_stats`].
    pub text: String,
}

impl StatElement {
    pub fn new(kind: StatKind, raw: Option<impl Into<String>>) -> Self {
        Self {
            kind,
            raw: raw.map(Into::into),
            text: String::new(),
        }
    }
}

/// Rewrite every element's visible text from its raw attribute.
pub fn hydrate_stats(elements: &mut [StatElement]) {
    for element in elements.iter_mut() {
        element.text = crate::number::format_raw(element.raw.as_deref());
    }
    tracing::debug!(count = elements.len(), "hydrated counters");
}
