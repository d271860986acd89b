//! # Latest-Item Resolution
//!
//! History endpoints return items oldest first, so the current state of an
//! entity is the last item of the last page. [`resolve_latest`] fetches
//! page 1, reads `total`, and re-fetches the real last page only when page 1
//! is not already it.
//!
//! The last page is `(total - 1) / per_page + 1`. When `total` is an exact
//! multiple of `per_page` this is `total / per_page`, never one past it.

use std::future::Future;

use katena_core::ValidationError;
use katena_entity::Page;

use crate::error::ClientError;

/// Index of the last page holding `total` items at `per_page` per page.
///
/// Returns 1 for an empty listing. A `per_page` of zero is treated as one.
pub fn last_page(total: u32, per_page: u32) -> u32 {
    if total == 0 {
        return 1;
    }
    (total - 1) / per_page.max(1) + 1
}

fn check_per_page(per_page: u32) -> Result<(), ClientError> {
    if per_page == 0 {
        return Err(ValidationError::OutOfRange {
            field: "per_page",
            min: 1,
            max: u32::MAX as usize,
            actual: 0,
        }
        .into());
    }
    Ok(())
}

fn not_found(what: &str) -> ClientError {
    ClientError::NotFound {
        what: what.to_string(),
    }
}

/// Page to re-fetch after page 1, if any.
fn refetch_page<T>(what: &str, first: &Page<T>, per_page: u32) -> Result<Option<u32>, ClientError> {
    if first.total == 0 {
        return Err(not_found(what));
    }
    if first.total <= per_page {
        return Ok(None);
    }
    Ok(Some(last_page(first.total, per_page)))
}

/// Last item of a paginated listing, using a blocking page fetcher.
///
/// `fetch(page, per_page)` is called for page 1 and at most once more.
pub fn resolve_latest<T, F>(what: &str, per_page: u32, mut fetch: F) -> Result<T, ClientError>
where
    F: FnMut(u32, u32) -> Result<Page<T>, ClientError>,
{
    check_per_page(per_page)?;
    let first = fetch(1, per_page)?;
    let page = match refetch_page(what, &first, per_page)? {
        None => first,
        Some(last) => {
            tracing::debug!(what, total = first.total, page = last, per_page, "fetching last page");
            fetch(last, per_page)?
        }
    };
    page.into_last().ok_or_else(|| not_found(what))
}

/// Last item of a paginated listing, using an async page fetcher.
pub async fn resolve_latest_async<T, F, Fut>(
    what: &str,
    per_page: u32,
    mut fetch: F,
) -> Result<T, ClientError>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, ClientError>>,
{
    check_per_page(per_page)?;
    let first = fetch(1, per_page).await?;
    let page = match refetch_page(what, &first, per_page)? {
        None => first,
        Some(last) => {
            tracing::debug!(what, total = first.total, page = last, per_page, "fetching last page");
            fetch(last, per_page).await?
        }
    };
    page.into_last().ok_or_else(|| not_found(what))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The last page holds the last item and is never past the end.
        #[test]
        fn last_page_brackets_total(total in 1u32..100_000, per_page in 1u32..500) {
            let page = last_page(total, per_page);
            prop_assert!((page - 1) * per_page < total);
            prop_assert!(total <= page * per_page);
        }

        #[test]
        fn resolve_latest_returns_final_item(total in 1u32..5_000, per_page in 1u32..200) {
            let latest = resolve_latest("item", per_page, |page, pp| {
                let start = (page - 1) * pp;
                let end = (start + pp).min(total);
                Ok(Page { items: (start.min(end)..end).collect::<Vec<u32>>(), total })
            }).unwrap();
            prop_assert_eq!(latest, total - 1);
        }
    }
}
