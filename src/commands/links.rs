use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use wikipage::{Page, PageMap, Wikipedia};

use crate::cli::PageArgs;
use crate::commands::{ensure_exists, open_page};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Listing {
    Links,
    Backlinks,
    Categories,
    Members,
}

impl Listing {
    fn as_str(self) -> &'static str {
        match self {
            Self::Links => "links",
            Self::Backlinks => "backlinks",
            Self::Categories => "categories",
            Self::Members => "categorymembers",
        }
    }

    fn load(self, page: &Page) -> Result<&PageMap> {
        match self {
            Self::Links => page.links(),
            Self::Backlinks => page.backlinks(),
            Self::Categories => page.categories(),
            Self::Members => page.categorymembers(),
        }
    }
}

pub fn run(wiki: &Wikipedia, args: PageArgs, listing: Listing) -> Result<()> {
    let page = open_page(wiki, &args);
    let pages = listing.load(&page)?;

    // List queries answer for missing titles too; only an empty result is worth checking.
    if pages.is_empty() && !ensure_exists(&page)? {
        return Ok(());
    }

    info!(
        title = %page.title(),
        listing = listing.as_str(),
        count = pages.len(),
        "loaded referenced pages"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    for (title, linked) in pages {
        writeln!(output, "{title}\t{}", linked.namespace())?;
    }
    output.flush()?;
    Ok(())
}

pub fn langlinks(wiki: &Wikipedia, args: PageArgs) -> Result<()> {
    let page = open_page(wiki, &args);
    let pages = page.langlinks()?;
    if !ensure_exists(&page)? {
        return Ok(());
    }

    info!(title = %page.title(), count = pages.len(), "loaded language links");

    let mut output = io::BufWriter::new(io::stdout().lock());
    for (language, linked) in pages {
        let url = linked.fullurl()?.unwrap_or_default();
        writeln!(output, "{language}\t{}\t{url}", linked.title())?;
    }
    output.flush()?;
    Ok(())
}
