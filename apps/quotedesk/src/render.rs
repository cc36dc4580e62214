//! # Document Renderer
//!
//! Turns a [`QuoteSnapshot`] into the printable order document.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <h1> store name                                                        │
//! │  <h2> document title                                                    │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ Patient / Document / Birth date / Phone / Order date / Notes      │ │
//! │  │ (missing → "Not provided", missing notes → "-")                   │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │  ┌──────┬──────┬────────────┬─────┬──────────┬──────────┐              │
//! │  │ Code │ Name │ Unit price │ Qty │ Discount │ Subtotal │              │
//! │  ├──────┴──────┴────────────┴─────┴──────────┴──────────┤              │
//! │  │ Cart subtotal / Overall discount / Grand total        │              │
//! │  └───────────────────────────────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use quotedesk_core::quote::format_date;
use quotedesk_core::{Money, QuoteSnapshot};

use crate::state::AppConfig;

/// Shown for customer fields left blank.
pub const NOT_PROVIDED: &str = "Not provided";

/// Produces a document from a quote snapshot.
pub trait DocumentRenderer {
    /// File extension of the produced document, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Renders the complete document text.
    fn render(&self, snapshot: &QuoteSnapshot) -> String;
}

// =============================================================================
// HTML
// =============================================================================

const STYLE: &str = "\
body { font-family: Arial, sans-serif; font-size: 14px; }
h1, h2 { margin: 4px 0; }
.customer { margin-bottom: 16px; }
.customer p { margin: 2px 0; }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th, td { border: 1px solid #555; padding: 6px; text-align: left; }
th { background: #eee; }
tfoot td { font-weight: bold; }";

/// Printable HTML page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub store_name: String,
    pub title: String,
    pub currency_symbol: String,
}

impl HtmlRenderer {
    pub fn from_config(config: &AppConfig) -> Self {
        HtmlRenderer {
            store_name: config.store_name.clone(),
            title: config.document_title.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Money) -> String {
        escape_html(&format!("{} {}", self.currency_symbol, amount))
    }

    fn customer_block(&self, snapshot: &QuoteSnapshot) -> String {
        let customer = &snapshot.customer;
        let text = |value: &Option<String>| {
            escape_html(value.as_deref().unwrap_or(NOT_PROVIDED))
        };
        let date = |value: Option<NaiveDate>| {
            value.map(format_date).unwrap_or_else(|| NOT_PROVIDED.to_string())
        };

        let notes = match &customer.notes {
            Some(notes) => format!(
                "<p><strong>Notes:</strong><br>{}</p>",
                escape_html(notes).replace('\n', "<br>")
            ),
            None => "<p><strong>Notes:</strong> -</p>".to_string(),
        };

        format!(
            "<div class=\"customer\">\n\
             <p><strong>Patient:</strong> {}</p>\n\
             <p><strong>Document:</strong> {}</p>\n\
             <p><strong>Birth date:</strong> {}</p>\n\
             <p><strong>Phone:</strong> {}</p>\n\
             <p><strong>Order date:</strong> {}</p>\n\
             {}\n\
             </div>",
            text(&customer.name),
            text(&customer.document_id),
            date(customer.birth_date),
            text(&customer.phone),
            snapshot.order_date_display(),
            notes,
        )
    }

    fn cart_table(&self, snapshot: &QuoteSnapshot) -> String {
        let mut rows = String::new();
        for quote_line in &snapshot.lines {
            let line = &quote_line.line;
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&line.code),
                escape_html(&line.name),
                self.money(line.unit_price),
                line.quantity,
                line.discount,
                self.money(quote_line.subtotal),
            ));
        }

        format!(
            "<table class=\"cart-table\">\n\
             <thead><tr><th>Code</th><th>Name</th><th>Unit price</th><th>Qty</th><th>Discount</th><th>Subtotal</th></tr></thead>\n\
             <tbody>\n{}</tbody>\n\
             <tfoot>\n\
             <tr><td colspan=\"5\">Cart subtotal</td><td>{}</td></tr>\n\
             <tr><td colspan=\"5\">Overall discount</td><td>{}</td></tr>\n\
             <tr><td colspan=\"5\">Grand total</td><td>{}</td></tr>\n\
             </tfoot>\n\
             </table>",
            rows,
            self.money(snapshot.cart_subtotal),
            snapshot.overall_discount,
            self.money(snapshot.grand_total),
        )
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, snapshot: &QuoteSnapshot) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <style>\n{style}\n</style>\n\
             </head>\n\
             <body>\n\
             <h1>{store}</h1>\n\
             <h2>{title}</h2>\n\
             {customer}\n\
             {table}\n\
             </body>\n\
             </html>\n",
            title = escape_html(&self.title),
            style = STYLE,
            store = escape_html(&self.store_name),
            customer = self.customer_block(snapshot),
            table = self.cart_table(snapshot),
        )
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotedesk_core::{Cart, CatalogEntry, CustomerDetails, CustomerField, Percent};

    fn renderer() -> HtmlRenderer {
        HtmlRenderer {
            store_name: "BigFarma".to_string(),
            title: "Exam Order".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }

    fn snapshot(customer: &CustomerDetails) -> QuoteSnapshot {
        let mut cart = Cart::new();
        let entry = CatalogEntry {
            code: "001".to_string(),
            name: "Hemograma <completo>".to_string(),
            price: Money::from_cents(5000),
        };
        cart.add(&entry, 2, Percent::from_bps(1000)).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        QuoteSnapshot::build(&cart, Percent::from_bps(5000), customer, today).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("Ácido Úrico"), "Ácido Úrico");
    }

    #[test]
    fn test_render_missing_customer_fields() {
        let html = renderer().render(&snapshot(&CustomerDetails::default()));

        assert!(html.contains("<p><strong>Patient:</strong> Not provided</p>"));
        assert!(html.contains("<p><strong>Birth date:</strong> Not provided</p>"));
        assert!(html.contains("<p><strong>Notes:</strong> -</p>"));
        assert!(html.contains("<p><strong>Order date:</strong> 15/03/2024</p>"));
    }

    #[test]
    fn test_render_customer_and_table() {
        let mut customer = CustomerDetails::default();
        customer.set(CustomerField::Name, "Ana <script>").unwrap();
        customer.set(CustomerField::BirthDate, "1990-04-23").unwrap();
        customer.set(CustomerField::Notes, "em jejum\ntrazer pedido").unwrap();

        let html = renderer().render(&snapshot(&customer));

        assert!(html.contains("<h1>BigFarma</h1>"));
        assert!(html.contains("Ana &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<strong>Birth date:</strong> 23/04/1990"));
        assert!(html.contains("em jejum<br>trazer pedido"));
        assert!(html.contains("<td>Hemograma &lt;completo&gt;</td>"));
        assert!(html.contains("<td>R$ 50.00</td><td>2</td><td>10.00%</td><td>R$ 90.00</td>"));
        assert!(html.contains("<td colspan=\"5\">Overall discount</td><td>50.00%</td>"));
        assert!(html.contains("<td colspan=\"5\">Grand total</td><td>R$ 45.00</td>"));
    }
}
