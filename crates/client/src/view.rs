//! Page surfaces driven by the controllers.
//!
//! A browser binding implements these over DOM nodes; the in-memory
//! implementations below back the command-line driver and the tests.

/// Container the product cards are appended to (`#product-grid`).
pub trait ProductGrid {
    /// Append one rendered card after the existing ones.
    fn append_card(&mut self, html: String);
}

/// The "view more" control (`#view-more-btn`).
pub trait LoadMoreTrigger {
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
}

/// Cart badge and notice surface touched by the add-to-cart flow.
pub trait CartView: Send {
    /// Text currently displayed in the cart counter (`.cart-count`).
    fn cart_count_text(&self) -> String;
    fn set_cart_count_text(&mut self, text: String);
    /// Show a user-visible notice (the page uses a blocking alert).
    fn show_notice(&mut self, message: &str);
}

/// Grid that keeps the appended cards in order.
#[derive(Debug, Default, Clone)]
pub struct CardList {
    cards: Vec<String>,
}

impl CardList {
    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl ProductGrid for CardList {
    fn append_card(&mut self, html: String) {
        self.cards.push(html);
    }
}

/// Grid that writes each card to stdout as it arrives.
#[derive(Debug, Default)]
pub struct StdoutGrid;

impl ProductGrid for StdoutGrid {
    fn append_card(&mut self, html: String) {
        println!("{html}");
    }
}

/// A show/hide toggle, initially visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    visible: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl LoadMoreTrigger for Toggle {
    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Cart badge text plus the notices shown so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCartView {
    pub count_text: String,
    pub notices: Vec<String>,
}

impl MemoryCartView {
    pub fn with_count(text: impl Into<String>) -> Self {
        Self {
            count_text: text.into(),
            notices: Vec::new(),
        }
    }
}

impl CartView for MemoryCartView {
    fn cart_count_text(&self) -> String {
        self.count_text.clone()
    }

    fn set_cart_count_text(&mut self, text: String) {
        self.count_text = text;
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
