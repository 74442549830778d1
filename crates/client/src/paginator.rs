//! "View more" pagination of the top-rated product grid.
//!
//! The first page is rendered by the server; each `load_next` fetches the
//! following page, appends its cards and hides the trigger once a short page
//! shows the listing is exhausted.

use storefront_core::ProductCard;

use crate::api::{ApiError, StorefrontApi};
use crate::view::{LoadMoreTrigger, ProductGrid};

/// Full page size served by `/load-more-top-rated`.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Lifecycle of the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// More pages may exist.
    Idle,
    /// A page request is in flight.
    Loading,
    /// A short page was received; terminal.
    Exhausted,
}

/// Result of one `load_next` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and rendered.
    Loaded {
        page: u32,
        count: usize,
        exhausted: bool,
    },
    /// The listing was already exhausted; nothing was requested.
    Exhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load page {page}: {source}")]
    Api {
        page: u32,
        #[source]
        source: ApiError,
    },
}

/// Controller behind the "view more" button.
///
/// Owns the page cursor; the grid and trigger are the page surfaces it
/// updates.
#[derive(Debug)]
pub struct ProductListPaginator<A, G, T> {
    api: A,
    grid: G,
    trigger: T,
    current_page: u32,
    page_size: usize,
    phase: LoadPhase,
    rendered: usize,
}

impl<A, G, T> ProductListPaginator<A, G, T>
where
    A: StorefrontApi,
    G: ProductGrid,
    T: LoadMoreTrigger,
{
    /// Start at page 1 (the server-rendered page) with the default page size.
    pub fn new(api: A, grid: G, trigger: T) -> Self {
        Self {
            api,
            grid,
            trigger,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            phase: LoadPhase::Idle,
            rendered: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == LoadPhase::Exhausted
    }

    /// Cards appended by this paginator so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn into_parts(self) -> (A, G, T) {
        (self.api, self.grid, self.trigger)
    }

    /// Fetch and render the next page.
    ///
    /// On failure the cursor, trigger and phase are left as they were so the
    /// same page is requested again on the next call.
    pub async fn load_next(&mut self) -> Result<LoadOutcome, LoadError> {
        if self.is_exhausted() {
            tracing::debug!(page = self.current_page, "listing exhausted; not loading");
            return Ok(LoadOutcome::Exhausted);
        }

        let page = self.current_page + 1;
        self.phase = LoadPhase::Loading;

        let products = match self.api.load_more_top_rated(page).await {
            Ok(products) => products,
            Err(source) => {
                self.phase = LoadPhase::Idle;
                tracing::error!(page, error = %source, "error fetching more products");
                return Err(LoadError::Api { page, source });
            }
        };

        for product in &products {
            if let Err(err) = product.validate() {
                tracing::warn!(product_id = %product.id, error = %err, "rendering inconsistent product");
            }
            self.grid.append_card(ProductCard::new(product).to_html());
        }

        let count = products.len();
        self.rendered += count;
        self.current_page = page;

        let exhausted = count < self.page_size;
        if exhausted {
            self.trigger.hide();
            self.phase = LoadPhase::Exhausted;
        } else {
            self.phase = LoadPhase::Idle;
        }

        tracing::info!(page, count, exhausted, "loaded more products");
        Ok(LoadOutcome::Loaded {
            page,
            count,
            exhausted,
        })
    }
}
