//! The storefront state container.
//!
//! [`Storefront`] owns the catalog, the cart, the detail/modal selection and
//! the derived totals. Every cart command stages its changes on copies of
//! the cart and the affected product, computes totals for the staged cart,
//! and only then commits all three together. A command that fails leaves
//! the storefront untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cart::{Cart, CartTotals, TaxRate};
use crate::catalog::{Catalog, Product, ProductFeed};
use crate::command::{Command, Outcome};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Catalog, cart and UI selection state for one shopping session.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    default_detail: Product,
    selected: ProductId,
    modal: ProductId,
    modal_open: bool,
    totals: CartTotals,
    tax_rate: TaxRate,
    currency: Currency,
}

/// Owned copy of everything a presentation layer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontSnapshot {
    pub products: Vec<Product>,
    pub cart: Vec<Product>,
    pub selected_product: Product,
    pub modal_open: bool,
    pub modal_product: Product,
    pub totals: CartTotals,
    pub item_count: u64,
}

impl Storefront {
    /// Build a storefront from a seed feed with the default tax rate.
    pub fn new(feed: &ProductFeed) -> Result<Self, CommerceError> {
        Self::with_tax_rate(feed, TaxRate::DEFAULT)
    }

    /// Build a storefront from a seed feed.
    pub fn with_tax_rate(feed: &ProductFeed, tax_rate: TaxRate) -> Result<Self, CommerceError> {
        let products = feed.to_products()?;
        let detail = feed.detail()?;
        Self::from_parts(&products, detail, feed.currency, tax_rate)
    }

    /// Build a storefront from already-converted products.
    ///
    /// `default_detail` is what the detail view and the modal show until a
    /// product is selected. Every price must be in `currency`.
    pub fn from_parts(
        products: &[Product],
        mut default_detail: Product,
        currency: Currency,
        tax_rate: TaxRate,
    ) -> Result<Self, CommerceError> {
        if let Some(stray) = products.iter().find(|p| p.price.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: stray.price.currency.code().to_string(),
            });
        }

        let catalog = Catalog::initialize(products)?;
        default_detail.reset_cart_fields();

        Ok(Self {
            catalog,
            cart: Cart::new(),
            selected: default_detail.id,
            modal: default_detail.id,
            default_detail,
            modal_open: false,
            totals: CartTotals::zero(currency),
            tax_rate,
            currency,
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All catalog products with their current cart fields.
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The product in the detail view, resolved against the live catalog.
    pub fn selected_product(&self) -> &Product {
        self.resolve(self.selected)
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// The product the confirmation modal shows (or last showed).
    pub fn modal_product(&self) -> &Product {
        self.resolve(self.modal)
    }

    /// Sum of quantities across the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Take an owned copy of the whole readable state.
    pub fn snapshot(&self) -> StorefrontSnapshot {
        StorefrontSnapshot {
            products: self.catalog.products().to_vec(),
            cart: self.cart.items().to_vec(),
            selected_product: self.selected_product().clone(),
            modal_open: self.modal_open,
            modal_product: self.modal_product().clone(),
            totals: self.totals,
            item_count: self.item_count(),
        }
    }

    fn resolve(&self, id: ProductId) -> &Product {
        self.catalog.get(id).unwrap_or(&self.default_detail)
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Run a command, absorbing any error.
    ///
    /// Failures are logged and reported as [`Outcome::Ignored`]; the state is
    /// left as it was.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let result = match command {
            Command::SelectForDetail(id) => self.select_for_detail(id),
            Command::AddToCart(id) => self.add_to_cart(id),
            Command::OpenModal(id) => self.open_modal(id),
            Command::CloseModal => {
                self.close_modal();
                Ok(())
            }
            Command::Increment(id) => self.increment(id),
            Command::Decrement(id) => self.decrement(id),
            Command::RemoveItem(id) => self.remove_item(id),
            Command::ClearCart => self.clear_cart(),
        };

        match result {
            Ok(()) => {
                debug!(
                    %command,
                    items = self.cart.unique_item_count(),
                    subtotal = self.totals.subtotal.amount_cents,
                    total = self.totals.total.amount_cents,
                    "command applied"
                );
                Outcome::Applied
            }
            Err(e) if e.is_not_found() => {
                debug!(%command, error = %e, "command ignored");
                Outcome::Ignored {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                warn!(%command, error = %e, "command ignored");
                Outcome::Ignored {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Show a product in the detail view.
    pub fn select_for_detail(&mut self, id: ProductId) -> Result<(), CommerceError> {
        self.catalog.lookup(id)?;
        self.selected = id;
        Ok(())
    }

    /// Put a product in the cart at quantity 1.
    ///
    /// Adding a product that is already in the cart resets it to quantity 1.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let mut product = self.catalog.lookup(id)?.clone();
        product.set_count(1)?;

        let mut cart = self.cart.clone();
        cart.add(&product)?;

        self.commit(cart, product)
    }

    /// Open the add-to-cart confirmation for a product.
    pub fn open_modal(&mut self, id: ProductId) -> Result<(), CommerceError> {
        self.catalog.lookup(id)?;
        self.modal = id;
        self.modal_open = true;
        Ok(())
    }

    /// Close the confirmation. The modal product stays readable.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Raise a line item's quantity by one.
    pub fn increment(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let count = self.line_count(id)?;
        let count = count.checked_add(1).ok_or(CommerceError::Overflow)?;
        self.set_line_count(id, count)
    }

    /// Lower a line item's quantity by one; at quantity 1 the item is removed.
    pub fn decrement(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let count = self.line_count(id)?;
        if count <= 1 {
            return self.remove_item(id);
        }
        self.set_line_count(id, count - 1)
    }

    /// Take a line item out of the cart and reset its catalog product.
    pub fn remove_item(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let mut cart = self.cart.clone();
        cart.remove(id)?;

        let mut product = self.catalog.lookup(id)?.clone();
        product.reset_cart_fields();

        self.commit(cart, product)
    }

    /// Empty the cart and re-seed the whole catalog from the feed.
    pub fn clear_cart(&mut self) -> Result<(), CommerceError> {
        let mut cart = self.cart.clone();
        cart.clear();
        let totals = CartTotals::compute(&cart, self.tax_rate, self.currency)?;

        self.cart = cart;
        self.catalog.reseed();
        self.totals = totals;
        Ok(())
    }

    /// Recompute totals from the current cart.
    ///
    /// Commands already do this; calling it again gives the same result.
    pub fn compute_totals(&mut self) -> Result<&CartTotals, CommerceError> {
        self.totals = CartTotals::compute(&self.cart, self.tax_rate, self.currency)?;
        Ok(&self.totals)
    }

    /// Check every catalog/cart/totals invariant.
    pub fn verify(&self) -> Result<(), CommerceError> {
        for product in self.catalog.products() {
            if !product.is_consistent() {
                return Err(CommerceError::Validation(format!(
                    "product {} has inconsistent cart fields",
                    product.id
                )));
            }
            let in_cart = self.cart.get(product.id);
            let mirrored = match in_cart {
                Some(line) => {
                    product.in_cart && line.count == product.count && line.total == product.total
                }
                None => !product.in_cart,
            };
            if !mirrored {
                return Err(CommerceError::Validation(format!(
                    "product {} does not match its line item",
                    product.id
                )));
            }
        }

        for line in self.cart.items() {
            if !line.in_cart || line.count == 0 || !line.is_consistent() {
                return Err(CommerceError::Validation(format!(
                    "line item {} is inconsistent",
                    line.id
                )));
            }
            if !self.catalog.contains(line.id) {
                return Err(CommerceError::ProductNotFound(line.id));
            }
        }

        let expected = CartTotals::compute(&self.cart, self.tax_rate, self.currency)?;
        if expected != self.totals {
            return Err(CommerceError::Validation("totals are stale".to_string()));
        }
        Ok(())
    }

    fn line_count(&self, id: ProductId) -> Result<u32, CommerceError> {
        self.cart
            .get(id)
            .map(|line| line.count)
            .ok_or(CommerceError::ItemNotInCart(id))
    }

    fn set_line_count(&mut self, id: ProductId, count: u32) -> Result<(), CommerceError> {
        let mut cart = self.cart.clone();
        cart.set_count(id, count)?;

        let mut product = self.catalog.lookup(id)?.clone();
        product.set_count(count)?;

        self.commit(cart, product)
    }

    /// Install a staged cart and product copy, with totals computed first.
    fn commit(&mut self, cart: Cart, product: Product) -> Result<(), CommerceError> {
        let totals = CartTotals::compute(&cart, self.tax_rate, self.currency)?;
        self.catalog.replace(product)?;
        self.cart = cart;
        self.totals = totals;
        Ok(())
    }
}
