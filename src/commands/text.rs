use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use wikipage::{SectionRef, Wikipedia};

use crate::cli::PageArgs;
use crate::commands::{ensure_exists, open_page};

pub fn summary(wiki: &Wikipedia, args: PageArgs) -> Result<()> {
    let page = open_page(wiki, &args);
    let summary = page.summary()?;
    if !ensure_exists(&page)? {
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "{summary}")?;
    output.flush()?;
    Ok(())
}

pub fn full_text(wiki: &Wikipedia, args: PageArgs) -> Result<()> {
    let page = open_page(wiki, &args);
    let text = page.text()?;
    if !ensure_exists(&page)? {
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "{text}")?;
    output.flush()?;
    Ok(())
}

pub fn sections(wiki: &Wikipedia, args: PageArgs) -> Result<()> {
    let page = open_page(wiki, &args);
    let sections = page.sections()?;
    if !ensure_exists(&page)? {
        return Ok(());
    }

    info!(
        title = %page.title(),
        sections = page.section_titles()?.len(),
        "loaded section tree"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    write_tree(&mut output, &sections)?;
    output.flush()?;
    Ok(())
}

fn write_tree(output: &mut impl Write, sections: &[SectionRef<'_>]) -> io::Result<()> {
    for section in sections {
        writeln!(
            output,
            "{}{}",
            "  ".repeat(section.level()),
            section.title()
        )?;
        write_tree(output, &section.sections())?;
    }
    Ok(())
}
