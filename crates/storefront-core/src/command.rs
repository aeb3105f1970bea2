//! Commands a presentation layer can send to the storefront.
//!
//! Commands have a compact text form used by scripts and the CLI:
//!
//! | text        | command                      |
//! |-------------|------------------------------|
//! | `detail:3`  | [`Command::SelectForDetail`] |
//! | `add:3`     | [`Command::AddToCart`]       |
//! | `open:3`    | [`Command::OpenModal`]       |
//! | `close`     | [`Command::CloseModal`]      |
//! | `inc:3`     | [`Command::Increment`]       |
//! | `dec:3`     | [`Command::Decrement`]       |
//! | `remove:3`  | [`Command::RemoveItem`]      |
//! | `clear`     | [`Command::ClearCart`]       |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;

/// A single storefront command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "id", rename_all = "snake_case")]
pub enum Command {
    /// Show a product in the detail view.
    SelectForDetail(ProductId),
    /// Put a product in the cart at quantity 1.
    AddToCart(ProductId),
    /// Open the add-to-cart confirmation for a product.
    OpenModal(ProductId),
    /// Close the confirmation.
    CloseModal,
    /// Raise a line item's quantity by one.
    Increment(ProductId),
    /// Lower a line item's quantity by one, removing it at zero.
    Decrement(ProductId),
    /// Take a line item out of the cart.
    RemoveItem(ProductId),
    /// Empty the cart and re-seed the catalog.
    ClearCart,
}

impl Command {
    /// The product a command targets, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match *self {
            Command::SelectForDetail(id)
            | Command::AddToCart(id)
            | Command::OpenModal(id)
            | Command::Increment(id)
            | Command::Decrement(id)
            | Command::RemoveItem(id) => Some(id),
            Command::CloseModal | Command::ClearCart => None,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Command::SelectForDetail(_) => "detail",
            Command::AddToCart(_) => "add",
            Command::OpenModal(_) => "open",
            Command::CloseModal => "close",
            Command::Increment(_) => "inc",
            Command::Decrement(_) => "dec",
            Command::RemoveItem(_) => "remove",
            Command::ClearCart => "clear",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.product_id() {
            Some(id) => write!(f, "{}:{}", self.verb(), id),
            None => write!(f, "{}", self.verb()),
        }
    }
}

impl FromStr for Command {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb.trim(), Some(arg.trim())),
            None => (s, None),
        };
        let verb = verb.to_ascii_lowercase();

        let id = || -> Result<ProductId, CommerceError> {
            let arg = arg.ok_or_else(|| {
                CommerceError::InvalidCommand(format!("`{verb}` needs a product id"))
            })?;
            arg.parse().map_err(|_| {
                CommerceError::InvalidCommand(format!("`{arg}` is not a product id"))
            })
        };
        let bare = |command: Command| -> Result<Command, CommerceError> {
            match arg {
                Some(_) => Err(CommerceError::InvalidCommand(format!(
                    "`{verb}` takes no argument"
                ))),
                None => Ok(command),
            }
        };

        match verb.as_str() {
            "detail" | "select" => Ok(Command::SelectForDetail(id()?)),
            "add" => Ok(Command::AddToCart(id()?)),
            "open" | "modal" => Ok(Command::OpenModal(id()?)),
            "close" => bare(Command::CloseModal),
            "inc" | "increment" => Ok(Command::Increment(id()?)),
            "dec" | "decrement" => Ok(Command::Decrement(id()?)),
            "remove" | "rm" => Ok(Command::RemoveItem(id()?)),
            "clear" => bare(Command::ClearCart),
            "" => Err(CommerceError::InvalidCommand("empty command".to_string())),
            other => Err(CommerceError::InvalidCommand(format!(
                "unknown command `{other}`"
            ))),
        }
    }
}

/// What happened to a command passed to
/// [`Storefront::apply`](crate::Storefront::apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The command ran and its changes are in place.
    Applied,
    /// The command was rejected; state is unchanged.
    Ignored { reason: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}
