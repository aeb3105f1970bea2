//! Output formatting for the CLI.

use console::style;
use storefront_core::cart::CartTotals;
use storefront_core::catalog::Product;
use storefront_core::command::Outcome;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", prefixed(style("ℹ").blue(), msg));
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", prefixed(style("✓").green(), msg));
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{}", prefixed(style("⚠").yellow(), msg));
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print an empty line.
    pub fn blank(&self) {
        if self.json {
            return;
        }
        println!();
    }

    /// Print a step in a process.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table, with cart columns when `with_cart` is set.
    pub fn products(&self, products: &[Product], with_cart: bool) {
        if with_cart {
            let widths = [4, 24, 10, 5, 10];
            self.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
            for p in products {
                let (id, price) = (p.id.to_string(), p.price.display());
                let (count, total) = (p.count.to_string(), p.total.display());
                self.table_row(
                    &[
                        id.as_str(),
                        p.title.as_str(),
                        price.as_str(),
                        count.as_str(),
                        total.as_str(),
                    ],
                    &widths,
                );
            }
        } else {
            let widths = [4, 24, 10, 10, 7];
            self.table_row(
                &["ID", "PRODUCT", "COMPANY", "PRICE", "IN CART"],
                &widths,
            );
            for p in products {
                let (id, price) = (p.id.to_string(), p.price.display());
                let in_cart = if p.in_cart { "yes" } else { "" };
                self.table_row(
                    &[
                        id.as_str(),
                        p.title.as_str(),
                        p.company.as_str(),
                        price.as_str(),
                        in_cart,
                    ],
                    &widths,
                );
            }
        }
    }

    /// Print cart totals.
    pub fn totals(&self, totals: &CartTotals) {
        self.kv("subtotal", &totals.subtotal.display());
        self.kv("tax", &totals.tax.display());
        self.kv("total", &style(totals.total.display()).bold().to_string());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// `icon msg`, or an empty line when there is no message.
fn prefixed(icon: impl std::fmt::Display, msg: &str) -> String {
    if msg.is_empty() {
        return String::new();
    }
    format!("{} {}", icon, msg)
}

/// Badge for a command outcome.
pub fn outcome_badge(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Applied => style("applied").green().to_string(),
        Outcome::Ignored { reason } => {
            format!("{} ({})", style("ignored").yellow(), style(reason).dim())
        }
    }
}
