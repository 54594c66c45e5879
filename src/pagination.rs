//! Page links for the paginated transaction listings.

use maud::{Markup, html};
use serde::Deserialize;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum number of page links to show in the pagination bar.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            max_pages: 5,
        }
    }
}

/// The `?page=N` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// Work out which page links to show for `curr_page` out of `page_count` pages.
///
/// At most `max_pages` consecutive page numbers are shown around the current
/// page. The first and last pages are always reachable, with an ellipsis
/// standing in for the pages that were skipped.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let to_indicator = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };
    let half_window = max_pages / 2;

    let window = if page_count <= max_pages {
        1..=page_count
    } else if curr_page <= half_window {
        1..=max_pages
    } else if curr_page > page_count - half_window {
        (page_count - max_pages + 1)..=page_count
    } else {
        (curr_page - half_window)..=(curr_page + half_window)
    };

    let mut indicators: Vec<PaginationIndicator> = window.map(to_indicator).collect();

    if page_count > max_pages {
        if curr_page > half_window + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < page_count - half_window {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        // Clamp so that "back" from a page past the end lands on the last page.
        let back_page = (curr_page - 1).min(page_count.max(1));
        indicators.insert(0, PaginationIndicator::BackButton(back_page));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

fn page_url(base_url: &str, page: u64) -> String {
    format!("{base_url}?page={page}")
}

/// Render `indicators` as a row of links to `base_url?page=N`.
pub fn pagination_nav(indicators: &[PaginationIndicator], base_url: &str) -> Markup {
    const LINK_STYLE: &str = "flex items-center justify-center px-3 h-8 leading-tight \
        text-gray-500 bg-white border border-gray-300 hover:bg-gray-100 hover:text-gray-700 \
        dark:bg-gray-800 dark:border-gray-700 dark:text-gray-400 dark:hover:bg-gray-700 \
        dark:hover:text-white";
    const CURRENT_STYLE: &str = "flex items-center justify-center px-3 h-8 \
        text-blue-600 border border-gray-300 bg-blue-50 dark:border-gray-700 \
        dark:bg-gray-700 dark:text-white";

    html! {
        @if !indicators.is_empty()
        {
            nav aria-label="Transaction pages" class="flex justify-center my-4"
            {
                ul class="inline-flex -space-x-px text-sm"
                {
                    @for indicator in indicators
                    {
                        li
                        {
                            @match indicator
                            {
                                PaginationIndicator::BackButton(page) => {
                                    a href=(page_url(base_url, *page)) class=(LINK_STYLE) { "Back" }
                                }
                                PaginationIndicator::Page(page) => {
                                    a href=(page_url(base_url, *page)) class=(LINK_STYLE) { (page) }
                                }
                                PaginationIndicator::CurrPage(page) => {
                                    a
                                        href=(page_url(base_url, *page))
                                        aria-current="page"
                                        class=(CURRENT_STYLE)
                                    { (page) }
                                }
                                PaginationIndicator::Ellipsis => {
                                    span class=(LINK_STYLE) { "…" }
                                }
                                PaginationIndicator::NextButton(page) => {
                                    a href=(page_url(base_url, *page)) class=(LINK_STYLE) { "Next" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
