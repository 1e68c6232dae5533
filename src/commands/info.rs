use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use wikipage::{Page, Wikipedia};

use crate::cli::InfoArgs;
use crate::commands::{ensure_exists, open_page};

#[derive(Debug, Serialize)]
struct PageInfo {
    title: String,
    language: String,
    ns: i64,
    pageid: Option<i64>,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    displaytitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contentmodel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastrevid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    touched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    talkid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fullurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonicalurl: Option<String>,
}

impl PageInfo {
    fn collect(page: &Page) -> Result<Self> {
        Ok(Self {
            pageid: page.pageid()?,
            exists: page.exists()?,
            displaytitle: page.displaytitle()?,
            contentmodel: page.contentmodel()?,
            length: page.length()?,
            lastrevid: page.lastrevid()?,
            touched: page.touched()?,
            talkid: page.talkid()?,
            fullurl: page.fullurl()?,
            canonicalurl: page.canonicalurl()?,
            title: page.title(),
            language: page.language(),
            ns: page.namespace(),
        })
    }
}

pub fn run(wiki: &Wikipedia, args: InfoArgs) -> Result<()> {
    let page = open_page(wiki, &args.page);
    let info = PageInfo::collect(&page)?;
    if !args.json && !ensure_exists(&page)? {
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &info)
            .context("failed to serialize page info json output")?;
        writeln!(output)?;
    } else {
        write_text(&mut output, &page, &info)?;
    }
    output.flush()?;
    Ok(())
}

fn write_text(output: &mut impl Write, page: &Page, info: &PageInfo) -> io::Result<()> {
    writeln!(output, "{page}")?;
    writeln!(output, "language: {}", info.language)?;
    if let Some(displaytitle) = &info.displaytitle {
        writeln!(output, "displaytitle: {displaytitle}")?;
    }
    if let Some(contentmodel) = &info.contentmodel {
        writeln!(output, "contentmodel: {contentmodel}")?;
    }
    if let Some(length) = info.length {
        writeln!(output, "length: {length}")?;
    }
    if let Some(lastrevid) = info.lastrevid {
        writeln!(output, "lastrevid: {lastrevid}")?;
    }
    if let Some(touched) = &info.touched {
        writeln!(output, "touched: {touched}")?;
    }
    if let Some(talkid) = info.talkid {
        writeln!(output, "talkid: {talkid}")?;
    }
    if let Some(fullurl) = &info.fullurl {
        writeln!(output, "fullurl: {fullurl}")?;
    }
    if let Some(canonicalurl) = &info.canonicalurl {
        writeln!(output, "canonicalurl: {canonicalurl}")?;
    }
    Ok(())
}
