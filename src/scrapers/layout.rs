use crate::error::ScrapeError;
use scraper::{Html, Selector};

// buyrentkenya.com card markup
// Multi-class selectors match the whole class attribute exactly; single classes match by containment.
const CARD: &str = r#"div[class="relative w-full overflow-hidden rounded-2xl bg-white"]"#;
const LOCATION: &str = r#"p[class="ml-1 truncate text-sm font-normal capitalize text-grey-650"]"#;
const SIZE: &str = r#"span.whitespace-nowrap[data-cy="card-area"]"#;
const BEDROOMS: &str = r#"span.whitespace-nowrap[data-cy="card-beds"]"#;
const BATHROOMS: &str = r#"span[class="whitespace-nowrap font-normal"][data-cy="card-bathrooms"]"#;
const DETAIL_LINK: &str = "a.no-underline";

// Detail page
const PRICE: &str = r#"span[class="block text-right text-xl font-semibold leading-7 md:text-xxl md:font-extrabold"]"#;

// Pagination controls
const PAGER: &str = r#"div[class="mt-4 flex w-full flex-row items-center justify-center space-x-1 md:space-x-3"]"#;
const FORWARD_ICON: &str = r#"svg[class="fill-current transform -rotate-90 inline-block text-secondary w-3"]"#;

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// Compiled selectors for listing cards and detail pages
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub card: Selector,
    pub location: Selector,
    pub size: Selector,
    pub bedrooms: Selector,
    pub bathrooms: Selector,
    pub detail_link: Selector,
    pub price: Selector,
}

impl SiteLayout {
    pub fn buyrentkenya() -> Result<Self, ScrapeError> {
        Ok(Self {
            card: compile(CARD)?,
            location: compile(LOCATION)?,
            size: compile(SIZE)?,
            bedrooms: compile(BEDROOMS)?,
            bathrooms: compile(BATHROOMS)?,
            detail_link: compile(DETAIL_LINK)?,
            price: compile(PRICE)?,
        })
    }
}

/// Decides from a parsed listing page whether another page follows
pub trait NextPagePredicate: Send + Sync {
    fn has_next_page(&self, document: &Html) -> bool;
}

/// Next page exists when both the pager container and the forward arrow icon are present.
///
/// The arrow is matched by its rotation class only, so a "previous" control styled
/// the same way would also satisfy it.
#[derive(Debug, Clone)]
pub struct MarkupNextPage {
    container: Selector,
    forward_icon: Selector,
}

impl MarkupNextPage {
    pub fn buyrentkenya() -> Result<Self, ScrapeError> {
        Ok(Self {
            container: compile(PAGER)?,
            forward_icon: compile(FORWARD_ICON)?,
        })
    }
}

impl NextPagePredicate for MarkupNextPage {
    fn has_next_page(&self, document: &Html) -> bool {
        document.select(&self.container).next().is_some()
            && document.select(&self.forward_icon).next().is_some()
    }
}
