pub mod info;
pub mod links;
pub mod text;

use anyhow::Result;
use tracing::warn;
use wikipage::{Page, Wikipedia};

use crate::cli::PageArgs;

pub(crate) fn open_page(wiki: &Wikipedia, args: &PageArgs) -> Page {
    wiki.page_in(&args.title, args.namespace)
}

pub(crate) fn ensure_exists(page: &Page) -> Result<bool> {
    if page.exists()? {
        return Ok(true);
    }
    warn!(title = %page.title(), language = %page.language(), "page does not exist");
    Ok(false)
}
