//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use keeg_store_core::storage::KeyValueStore;
use keeg_store_core::stores::{CartStore, FavoritesStore, WishlistChange, WishlistStore};
use keeg_store_core::{Notification, Product, ProductId};
use tracing::instrument;

use crate::catalog::CatalogClient;
use crate::checkout::{CheckoutError, CheckoutFlow};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::notify::Notifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// stores, the catalog client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    favorites: FavoritesStore,
    notifier: Notifier,
    checkout: CheckoutFlow,
}

impl AppState {
    /// Create a new application state, loading the stores from `storage`.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let cart = CartStore::initialize(Arc::clone(&storage));
        let wishlist = WishlistStore::initialize(Arc::clone(&storage));
        let favorites = FavoritesStore::new(storage);
        let notifier = Notifier::new(config.timing.notification_dismiss);
        let checkout = CheckoutFlow::new(config.timing);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                wishlist: Mutex::new(wishlist),
                favorites,
                notifier,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.inner.checkout
    }

    /// Lock the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn cart(&self) -> Result<MutexGuard<'_, CartStore>> {
        self.inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))
    }

    /// Lock the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn wishlist(&self) -> Result<MutexGuard<'_, WishlistStore>> {
        self.inner
            .wishlist
            .lock()
            .map_err(|_| AppError::Internal("wishlist lock poisoned".to_string()))
    }

    /// Add one unit of `product` to the cart and announce it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart lock is poisoned.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product) -> Result<()> {
        self.cart()?.add_to_cart(product);
        self.notifier()
            .show(Notification::added_to_cart(&product.title));
        Ok(())
    }

    /// Save `product` to the wishlist and announce it.
    ///
    /// Returns `None` without a notification if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist lock is poisoned.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_wishlist(&self, product: &Product) -> Result<Option<WishlistChange>> {
        let change = self.wishlist()?.add(product);
        self.announce(change.as_ref());
        Ok(change)
    }

    /// Drop `id` from the wishlist and announce it.
    ///
    /// Returns `None` without a notification if it was not saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist lock is poisoned.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&self, id: ProductId) -> Result<Option<WishlistChange>> {
        let change = self.wishlist()?.remove(id);
        self.announce(change.as_ref());
        Ok(change)
    }

    fn announce(&self, change: Option<&WishlistChange>) {
        if let Some(change) = change {
            self.notifier().show(change.notification());
        }
    }

    /// Start the simulated checkout. The cart is cleared once processing ends.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart and
    /// `CheckoutError::AlreadyProcessing` while another checkout runs.
    #[instrument(skip(self))]
    pub fn start_checkout(&self) -> Result<()> {
        if self.cart()?.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        let state = self.clone();
        self.checkout().start(move || {
            if let Err(e) = state.cart().map(|mut cart| cart.clear_cart()) {
                tracing::error!(error = %e, "Failed to clear cart after checkout");
            }
        })?;

        Ok(())
    }
}
