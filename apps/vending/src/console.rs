//! # Console
//!
//! Prompt/response I/O around a [`VendingMachine`].
//!
//! ## Purchase Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    select_and_purchase()                                │
//! │                                                                         │
//! │  show products ◄──────────────────────────────────────────┐            │
//! │       │                                                   │            │
//! │       ▼                                                   │            │
//! │  "Select a product" ── blank / q / EOF ──► receipt ──► commit         │
//! │       │                                                   │            │
//! │       ├── not a number / out of range ── message ────────►┤            │
//! │       ▼                                                   │            │
//! │  "Quantity" ── not a number ── message ──────────────────►┤            │
//! │       │                                                   │            │
//! │       ▼                                                   │            │
//! │  machine.purchase() ── CoreError ── message ─────────────►┤            │
//! │       │                                                   │            │
//! │       ▼                                                   │            │
//! │  "Purchase another item?" ── y ──────────────────────────►┘            │
//! │       │ n / EOF                                                        │
//! │       ▼                                                                 │
//! │  receipt ──► machine.complete_session()                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so tests can drive the loop with in-memory
//! buffers. The clock is injected for the same reason.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use vend_core::{AppliedDiscount, Money, Product, SalesLedger, Session, VendingMachine};

/// What happened in one customer's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: Money,
    pub items: usize,
    /// Whether the session was recorded in the ledger.
    pub recorded: bool,
    /// Input ended while the session was running.
    pub input_closed: bool,
}

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes a message line.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Reads one trimmed line. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks a yes/no question. `y`/`yes` (any case) is yes, anything else no.
    /// `None` at end of input.
    pub fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        let answer = self.prompt(&format!("{} (y/n): ", question))?;
        Ok(answer.map(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")))
    }

    /// Reports a product being loaded into the machine.
    pub fn announce_added(&mut self, machine_name: &str, product: &Product) -> io::Result<()> {
        writeln!(
            self.output,
            "Added {} {} to {}",
            product.stock(),
            product.name(),
            machine_name
        )
    }

    /// Reports each discount drawn at startup.
    pub fn report_discounts(&mut self, applied: &[AppliedDiscount]) -> io::Result<()> {
        for discount in applied {
            writeln!(
                self.output,
                "Applied {} discount to {}. New price: {}",
                discount.discount, discount.name, discount.new_price
            )?;
        }
        Ok(())
    }

    /// Lists the machine's products with their 1-based positions.
    pub fn display_products(&mut self, machine: &VendingMachine) -> io::Result<()> {
        writeln!(self.output, "Products in {}:", machine.name())?;
        for (index, product) in machine.products().iter().enumerate() {
            writeln!(self.output, "  {}. {}", index + 1, product)?;
        }
        Ok(())
    }

    /// Runs one customer's purchase loop, prints the receipt, and commits the
    /// session to the machine's ledger.
    pub fn select_and_purchase<C>(
        &mut self,
        machine: &mut VendingMachine,
        clock: C,
    ) -> io::Result<SessionSummary>
    where
        C: Fn() -> DateTime<Utc>,
    {
        let mut session = Session::new(clock());
        let mut input_closed = false;

        writeln!(self.output)?;
        writeln!(self.output, "Welcome to {}!", machine.name())?;

        loop {
            self.display_products(machine)?;

            let count = machine.products().len();
            let choice = match self.prompt(&format!(
                "Select a product (1-{}), or q to finish: ",
                count
            ))? {
                Some(choice) => choice,
                None => {
                    input_closed = true;
                    break;
                }
            };
            if choice.is_empty() || choice.eq_ignore_ascii_case("q") {
                break;
            }

            let position = match choice.parse::<usize>() {
                Ok(position) => position,
                Err(_) => {
                    warn!(input = %choice, "Unparsable selection");
                    writeln!(self.output, "'{}' is not a product number.", choice)?;
                    continue;
                }
            };
            if let Err(err) = machine.product(position) {
                warn!(position, "Selection out of range");
                writeln!(self.output, "{}", err)?;
                continue;
            }

            let raw_quantity = match self.prompt("Quantity: ")? {
                Some(raw) => raw,
                None => {
                    input_closed = true;
                    break;
                }
            };
            let quantity = match raw_quantity.parse::<i64>() {
                Ok(quantity) => quantity,
                Err(_) => {
                    warn!(input = %raw_quantity, "Unparsable quantity");
                    writeln!(self.output, "'{}' is not a valid quantity.", raw_quantity)?;
                    continue;
                }
            };

            match machine.purchase(&mut session, position, quantity, clock()) {
                Ok(line) => {
                    writeln!(
                        self.output,
                        "Purchased {} x {} for {}. Session total: {}",
                        line.quantity,
                        line.name,
                        line.line_total(),
                        session.total()
                    )?;
                }
                Err(err) => {
                    warn!(position, quantity, error = %err, "Purchase rejected");
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            }

            match self.confirm("Would you like to purchase another item?")? {
                Some(true) => continue,
                Some(false) => break,
                None => {
                    input_closed = true;
                    break;
                }
            }
        }

        self.print_receipt(&session)?;

        let total = session.total();
        let items = session.lines().len();
        let recorded = match machine.complete_session(session, clock()) {
            Ok(transaction) => transaction.is_some(),
            Err(err) => {
                warn!(error = %err, "Session not recorded");
                writeln!(self.output, "{}", err)?;
                false
            }
        };
        if recorded {
            writeln!(self.output, "Thank you for your purchase!")?;
        }
        debug!(%total, items, recorded, input_closed, "Session finished");

        Ok(SessionSummary {
            total,
            items,
            recorded,
            input_closed,
        })
    }

    /// Serves customers until one declines to continue or input ends.
    pub fn serve_customers<C>(&mut self, machine: &mut VendingMachine, clock: C) -> io::Result<()>
    where
        C: Fn() -> DateTime<Utc>,
    {
        loop {
            let summary = self.select_and_purchase(machine, &clock)?;
            if summary.input_closed {
                return Ok(());
            }
            match self.confirm("Serve another customer?")? {
                Some(true) => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Prints the itemized receipt for a session.
    pub fn print_receipt(&mut self, session: &Session) -> io::Result<()> {
        writeln!(self.output)?;
        if session.is_empty() {
            return writeln!(self.output, "No items purchased.");
        }

        writeln!(self.output, "----- Receipt -----")?;
        for line in session.lines() {
            write!(
                self.output,
                "{} x {} @ {}",
                line.quantity,
                line.name,
                line.effective_unit_price()
            )?;
            if !line.discount().is_zero() {
                write!(self.output, " ({} off)", line.discount())?;
            }
            writeln!(self.output, " = {}", line.line_total())?;
        }
        writeln!(self.output, "Total: {}", session.total())?;
        writeln!(self.output, "-------------------")
    }

    /// Prints the machine's running totals.
    pub fn print_ledger(&mut self, machine_name: &str, ledger: &SalesLedger) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Sales summary for {}:", machine_name)?;
        writeln!(self.output, "  Total sales: {}", ledger.total_sales())?;
        writeln!(
            self.output,
            "  Total transactions: {}",
            ledger.total_transactions()
        )
    }
}
