//! Product card rendering for the product grid.
//!
//! Cards are rendered to HTML fragments matching the markup of the
//! server-rendered grid, so appended cards pick up the same styling and the
//! same `data-*` hooks used by [`crate::stats`].

use core::fmt;

use crate::number::format_count;
use crate::product::Product;

/// Currency suffix appended to prices.
pub const CURRENCY: &str = "VND";

/// A renderable card view over a [`Product`].
#[derive(Debug, Clone, Copy)]
pub struct ProductCard<'a> {
    product: &'a Product,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self { product }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// `"{n}% Off"` when the product is discounted.
    pub fn discount_label(&self) -> Option<String> {
        self.product.discount_percent().map(|p| format!("{p}% Off"))
    }

    /// Discounted price with `.` thousands separators, e.g. `"80.000 VND"`.
    pub fn price_label(&self) -> String {
        format!("{} {CURRENCY}", group_thousands(self.product.sale_price()))
    }

    /// Render to an owned HTML string.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProductCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.product;
        let name = escape_html(&p.name);
        let rating = p.average_rating.unwrap_or(0.0);

        writeln!(f, r#"<div class="product-card">"#)?;
        writeln!(f, r#"    <div class="product-image">"#)?;
        writeln!(
            f,
            r#"        <img src="{}" alt="{name}">"#,
            escape_html(p.primary_image())
        )?;
        if let Some(label) = self.discount_label() {
            writeln!(f, r#"        <span class="discount-label">{label}</span>"#)?;
        }
        writeln!(f, r#"    </div>"#)?;
        writeln!(f, r#"    <div class="product-info">"#)?;
        writeln!(f, r#"        <h3>{name}</h3>"#)?;
        writeln!(f, r#"        <p class="price">{}</p>"#, self.price_label())?;
        writeln!(f, r#"        <div class="product-rating">"#)?;
        writeln!(
            f,
            r#"            <p class="rating" data-review-count="{}">"#,
            p.review_count
        )?;
        writeln!(
            f,
            r#"                {rating} (<span class="formatted-review-count">{}</span> reviews)"#,
            format_count(p.review_count as f64)
        )?;
        writeln!(f, r#"            </p>"#)?;
        writeln!(
            f,
            r#"            <p class="sold-count" data-quantity-sold="{}">"#,
            p.quantity_sold
        )?;
        writeln!(
            f,
            r#"                Đã bán <span class="formatted-quantity-sold">{}</span>"#,
            format_count(p.quantity_sold as f64)
        )?;
        writeln!(f, r#"            </p>"#)?;
        writeln!(f, r#"        </div>"#)?;
        writeln!(
            f,
            r#"        <a href="/product/{}" class="details-btn">View Details</a>"#,
            escape_html(p.id.as_str())
        )?;
        writeln!(f, r#"    </div>"#)?;
        write!(f, r#"</div>"#)
    }
}

/// Round to a whole amount and group digits by thousands with `.`.
pub fn group_thousands(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.round() } else { 0.0 };
    let digits = format!("{:.0}", amount.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Escape text for use in HTML text nodes and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn product(list_price: f64, discount: f64) -> Product {
        Product {
            id: "sku-9".parse().unwrap(),
            name: "Áo thun".to_string(),
            images: "['https://cdn.example/a.jpg']".to_string(),
            list_price,
            discount,
            average_rating: Some(4.5),
            review_count: 1500,
            quantity_sold: 999,
        }
    }

    #[test]
    fn discount_label_rendered_when_discounted() {
        let p = product(100_000.0, 20_000.0);
        let card = ProductCard::new(&p);
        assert_eq!(card.discount_label().as_deref(), Some("20% Off"));
        assert!(card.to_html().contains(r#"<span class="discount-label">20% Off</span>"#));
    }

    #[test]
    fn no_discount_label_without_discount() {
        let p = product(100_000.0, 0.0);
        let html = ProductCard::new(&p).to_html();
        assert!(!html.contains("discount-label"));
    }

    #[test]
    fn card_embeds_formatted_counts_and_raw_attributes() {
        let p = product(100_000.0, 20_000.0);
        let html = ProductCard::new(&p).to_html();
        assert!(html.contains(r#"data-review-count="1500""#));
        assert!(html.contains(r#"<span class="formatted-review-count">1.5k</span>"#));
        assert!(html.contains(r#"data-quantity-sold="999""#));
        assert!(html.contains(r#"<span class="formatted-quantity-sold">999</span>"#));
        assert!(html.contains("4.5 ("));
        assert!(html.contains(r#"<a href="/product/sku-9" class="details-btn">"#));
        assert!(html.contains(r#"<img src="https://cdn.example/a.jpg" alt="Áo thun">"#));
    }

    #[test]
    fn price_label_uses_dot_grouping() {
        let p = product(1_234_567.0, 0.0);
        assert_eq!(ProductCard::new(&p).price_label(), "1.234.567 VND");

        let p = product(100_000.0, 20_000.0);
        assert_eq!(ProductCard::new(&p).price_label(), "80.000 VND");
    }

    #[test]
    fn group_thousands_edges() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1.000");
        assert_eq!(group_thousands(-2500.0), "-2.500");
        assert_eq!(group_thousands(f64::NAN), "0");
    }

    #[test]
    fn untrusted_text_is_escaped() {
        let mut p = product(10.0, 0.0);
        p.name = r#"<script>alert("x")</script>"#.to_string();
        let html = ProductCard::new(&p).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
    }
}
