//! Page-walking helpers shared by every paginated listing.
//!
//! Both helpers request pages in order starting at page 1 and stop as soon as
//! a page comes back holding fewer records than the page size. A page that is
//! exactly full always triggers one more request, even if it turns out empty.

use std::future::Future;

use crate::{GatewayError, PageRequest};

/// Fetches every page and concatenates them in order.
///
/// # Errors
///
/// The first [`GatewayError`] returned by `fetch`; pages gathered so far are
/// discarded.
pub async fn collect_all<T, F, Fut>(per_page: u32, mut fetch: F) -> Result<Vec<T>, GatewayError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>, GatewayError>>,
{
    let mut request = PageRequest::first(per_page);
    let mut all = Vec::new();
    loop {
        let page = fetch(request).await?;
        let last = request.is_last(page.len());
        all.extend(page);
        if last {
            return Ok(all);
        }
        request = request.next();
    }
}

/// Fetches pages until one holds a record satisfying `predicate`.
///
/// Returns the first matching record in page order without requesting any
/// later page, or `None` once the last page has been searched.
pub async fn find_first<T, F, Fut, P>(
    per_page: u32,
    mut fetch: F,
    mut predicate: P,
) -> Result<Option<T>, GatewayError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>, GatewayError>>,
    P: FnMut(&T) -> bool,
{
    let mut request = PageRequest::first(per_page);
    loop {
        let page = fetch(request).await?;
        let last = request.is_last(page.len());
        if let Some(found) = page.into_iter().find(|item| predicate(item)) {
            return Ok(Some(found));
        }
        if last {
            return Ok(None);
        }
        request = request.next();
    }
}
