//! # Order Form Shell
//!
//! Line-oriented terminal form over the commands.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add <qty> <discount%> <query>   add an entry (name, code or label)    │
//! │  price <query>                   preview the price of an entry         │
//! │  remove <code>                   remove a line                         │
//! │  discount <pct>                  set the overall discount              │
//! │  list                            show the cart and totals              │
//! │  json                            cart and totals as JSON               │
//! │  suggest [query]                 picker labels                         │
//! │  customer <field> <value>        fill the customer block               │
//! │  export [path]                   write the printable document          │
//! │  clear                           empty the cart                        │
//! │  new                             start a new order                     │
//! │  help / quit                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing command prints its message and the form carries on.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use quotedesk_core::validation::parse_quantity;
use quotedesk_core::CustomerField;

use crate::commands::cart::{self, CartResponse};
use crate::commands::catalog::{self, DEFAULT_SUGGESTION_LIMIT};
use crate::commands::quote;
use crate::error::ApiError;
use crate::render::DocumentRenderer;
use crate::state::{AppConfig, CatalogState, Session};

const PROMPT: &str = "> ";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add {
        quantity: Option<i64>,
        discount: String,
        query: String,
    },
    Price { query: String },
    Remove { code: String },
    Discount { raw: String },
    List,
    Json,
    Suggest { query: String },
    Customer { field: String, value: String },
    Export { path: Option<PathBuf> },
    Clear,
    NewOrder,
    Help,
    Quit,
}

/// Splits off the first whitespace-separated word.
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim_start()),
        None => (text, ""),
    }
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::validation(format!("usage: {}", usage)))
    } else {
        Ok(value)
    }
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = next_word(line);

        match verb.to_lowercase().as_str() {
            "add" => {
                const USAGE: &str = "add <qty> <discount%> <query>";
                let (quantity, rest) = next_word(rest);
                let (discount, query) = next_word(rest);
                Ok(ShellCommand::Add {
                    quantity: parse_quantity(required(quantity, USAGE)?),
                    discount: required(discount, USAGE)?.to_string(),
                    query: required(query, USAGE)?.to_string(),
                })
            }
            "price" => Ok(ShellCommand::Price {
                query: required(rest, "price <query>")?.to_string(),
            }),
            "remove" => Ok(ShellCommand::Remove {
                code: required(rest, "remove <code>")?.to_string(),
            }),
            "discount" => Ok(ShellCommand::Discount {
                raw: required(rest, "discount <pct>")?.to_string(),
            }),
            "list" => Ok(ShellCommand::List),
            "json" => Ok(ShellCommand::Json),
            "suggest" => Ok(ShellCommand::Suggest {
                query: rest.trim().to_string(),
            }),
            "customer" => {
                let (field, value) = next_word(rest);
                Ok(ShellCommand::Customer {
                    field: required(field, "customer <field> <value>")?.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "export" => Ok(ShellCommand::Export {
                path: Some(rest.trim())
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            }),
            "clear" => Ok(ShellCommand::Clear),
            "new" => Ok(ShellCommand::NewOrder),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ApiError::validation(format!(
                "unknown command '{}', type 'help'",
                other
            ))),
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The order form: session, configuration and the document renderer.
pub struct Shell {
    session: Session,
    config: AppConfig,
    renderer: Box<dyn DocumentRenderer>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Shell {
    pub fn new(session: Session, config: AppConfig, renderer: Box<dyn DocumentRenderer>) -> Self {
        Shell {
            session,
            config,
            renderer,
            today: local_today,
        }
    }

    /// Replaces the clock used for the default order date.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.print_status(out)?;
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() && self.handle_line(&line, out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Parses and runs one line, printing the reply or the error.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let result = line
            .parse::<ShellCommand>()
            .and_then(|command| self.execute(command));

        match result {
            Ok(Some(reply)) => {
                writeln!(out, "{}", reply)?;
                Ok(Flow::Continue)
            }
            Ok(None) => Ok(Flow::Quit),
            Err(e) => {
                writeln!(out, "error: {}", e.message)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs a command. `None` means quit.
    pub fn execute(&mut self, command: ShellCommand) -> Result<Option<String>, ApiError> {
        let reply = match command {
            ShellCommand::Add {
                quantity,
                discount,
                query,
            } => {
                let response = cart::add_to_cart(&mut self.session, &query, quantity, &discount)?;
                self.cart_text(&response)
            }
            ShellCommand::Price { query } => {
                let preview = catalog::preview_price(&self.session, &query)?;
                format!("{}  {}", preview.label, self.config.format_currency(preview.price))
            }
            ShellCommand::Remove { code } => {
                let response = cart::remove_from_cart(&mut self.session, &code);
                self.cart_text(&response)
            }
            ShellCommand::Discount { raw } => {
                let response = cart::set_overall_discount(&mut self.session, &raw);
                self.cart_text(&response)
            }
            ShellCommand::List => self.cart_text(&cart::get_cart(&self.session)),
            ShellCommand::Json => serde_json::to_string_pretty(&cart::get_cart(&self.session))
                .map_err(|e| ApiError::internal(e.to_string()))?,
            ShellCommand::Suggest { query } => {
                let labels = catalog::suggest(&self.session, &query, DEFAULT_SUGGESTION_LIMIT)?;
                if labels.is_empty() {
                    "No matching entries.".to_string()
                } else {
                    labels.join("\n")
                }
            }
            ShellCommand::Customer { field, value } => {
                quote::set_customer_field(&mut self.session, &field, &value)?;
                format!("{} updated.", field.trim().to_lowercase())
            }
            ShellCommand::Export { path } => {
                let response = quote::export_quote(
                    &self.session,
                    self.renderer.as_ref(),
                    &self.config.output_dir,
                    path,
                    (self.today)(),
                )?;
                format!("Document written to {}", response.path.display())
            }
            ShellCommand::Clear => {
                let response = cart::clear_cart(&mut self.session);
                self.cart_text(&response)
            }
            ShellCommand::NewOrder => {
                self.session.reset();
                "New order started.".to_string()
            }
            ShellCommand::Help => help_text(),
            ShellCommand::Quit => return Ok(None),
        };

        Ok(Some(reply))
    }

    fn print_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.catalog_state() {
            CatalogState::Ready(catalog) => {
                writeln!(out, "{}: {} catalog entries. Type 'help'.", self.config.store_name, catalog.len())
            }
            CatalogState::NotLoaded => writeln!(out, "Catalog not loaded yet."),
            CatalogState::Failed { reason } => {
                writeln!(out, "Catalog unavailable ({}). The cart stays empty.", reason)
            }
        }
    }

    fn cart_text(&self, response: &CartResponse) -> String {
        if response.lines.is_empty() {
            return "Cart is empty.".to_string();
        }

        let money = |m| self.config.format_currency(m);
        let mut text = format!(
            "{:<8} {:<32} {:>12} {:>5} {:>9} {:>12}\n",
            "Code", "Name", "Unit price", "Qty", "Discount", "Subtotal"
        );
        for line in &response.lines {
            text.push_str(&format!(
                "{:<8} {:<32} {:>12} {:>5} {:>9} {:>12}\n",
                line.code,
                line.name,
                money(line.unit_price),
                line.quantity,
                line.discount.to_string(),
                money(line.subtotal),
            ));
        }

        let totals = &response.totals;
        text.push_str(&format!("Subtotal:         {}\n", money(totals.subtotal)));
        text.push_str(&format!("Overall discount: {}\n", totals.overall_discount));
        text.push_str(&format!("Grand total:      {}", money(totals.grand_total)));
        text
    }
}

fn help_text() -> String {
    let fields: Vec<&str> = CustomerField::ALL.iter().map(|f| f.key()).collect();
    format!(
        "add <qty> <discount%> <query>   add an entry (name, code or \"code - name\")\n\
         price <query>                   preview the price of an entry\n\
         remove <code>                   remove a line\n\
         discount <pct>                  set the overall discount\n\
         list                            show the cart and totals\n\
         json                            cart and totals as JSON\n\
         suggest [query]                 list matching entries\n\
         customer <field> <value>        fields: {}\n\
         export [path]                   write the printable document\n\
         clear                           empty the cart\n\
         new                             start a new order\n\
         quit                            leave",
        fields.join(", ")
    )
}
