//! Remote call groups and the attributes each of them supplies.

use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::client::Wikipedia;
use crate::model::{LinkRecord, PageRecord, QueryBody};
use crate::outline::Outline;
use crate::page::{Page, PageMap};
use crate::pagination::query_paginated;
use crate::transport::QueryParams;
use crate::util::set_param;

const MISSING_PAGE_KEY: &str = "-1";
const COMMON_ATTRIBUTES: &[&str] = &["title", "pageid", "ns", "redirects"];
const INFO_PROPERTIES: &str = "protection|talkid|watched|watchers|visitingwatchers|notificationtimestamp|subjectid|url|readable|preload|displaytitle";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CallGroup {
    Structured,
    Info,
    Langlinks,
    Links,
    Backlinks,
    Categories,
    Categorymembers,
}

impl CallGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Info => "info",
            Self::Langlinks => "langlinks",
            Self::Links => "links",
            Self::Backlinks => "backlinks",
            Self::Categories => "categories",
            Self::Categorymembers => "categorymembers",
        }
    }
}

use CallGroup::{Info, Langlinks, Structured};

/// Groups able to supply each readable attribute, in the order they are tried.
const ATTRIBUTE_GROUPS: &[(&str, &[CallGroup])] = &[
    ("language", &[]),
    ("pageid", &[Info, Structured, Langlinks]),
    ("ns", &[Info, Structured, Langlinks]),
    ("title", &[Info, Structured, Langlinks]),
    ("contentmodel", &[Info]),
    ("pagelanguage", &[Info]),
    ("pagelanguagehtmlcode", &[Info]),
    ("pagelanguagedir", &[Info]),
    ("touched", &[Info]),
    ("lastrevid", &[Info]),
    ("length", &[Info]),
    ("protection", &[Info]),
    ("restrictiontypes", &[Info]),
    ("watchers", &[Info]),
    ("visitingwatchers", &[Info]),
    ("notificationtimestamp", &[Info]),
    ("talkid", &[Info]),
    ("fullurl", &[Info]),
    ("editurl", &[Info]),
    ("canonicalurl", &[Info]),
    ("readable", &[Info]),
    ("preload", &[Info]),
    ("displaytitle", &[Info]),
];

pub fn groups_for(attribute: &str) -> Option<&'static [CallGroup]> {
    ATTRIBUTE_GROUPS
        .iter()
        .find(|(name, _)| *name == attribute)
        .map(|(_, groups)| *groups)
}

#[derive(Debug, Clone)]
pub(crate) struct PageIdentity {
    pub title: String,
    pub language: String,
}

#[derive(Debug, Default)]
pub(crate) enum GroupContent {
    #[default]
    Nothing,
    Outline(Outline),
    Pages(PageMap),
}

#[derive(Debug, Default)]
pub(crate) struct GroupPayload {
    pub attributes: Map<String, Value>,
    pub missing: bool,
    pub content: GroupContent,
}

impl GroupPayload {
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    fn absorb_common(&mut self, fields: &Map<String, Value>) {
        for name in COMMON_ATTRIBUTES {
            if let Some(value) = fields.get(*name) {
                self.attributes.insert((*name).to_string(), value.clone());
            }
        }
    }
}

enum PageLookup {
    Found(String, PageRecord),
    Missing,
    Empty,
}

fn take_page(body: &mut QueryBody) -> PageLookup {
    let Some(key) = body.pages.keys().next().cloned() else {
        return PageLookup::Empty;
    };
    if key == MISSING_PAGE_KEY {
        return PageLookup::Missing;
    }
    match body.pages.remove(&key) {
        Some(record) => PageLookup::Found(key, record),
        None => PageLookup::Empty,
    }
}

fn query_params(pairs: &[(&str, &str)]) -> QueryParams {
    let mut params = vec![("action".to_string(), "query".to_string())];
    for (key, value) in pairs {
        set_param(&mut params, key, (*value).to_string());
    }
    params
}

pub(crate) fn fetch(
    wiki: &Wikipedia,
    group: CallGroup,
    identity: &PageIdentity,
) -> Result<GroupPayload> {
    match group {
        CallGroup::Structured => fetch_structured(wiki, identity),
        CallGroup::Info => fetch_info(wiki, identity),
        CallGroup::Langlinks => fetch_langlinks(wiki, identity),
        CallGroup::Links => fetch_links(wiki, identity),
        CallGroup::Backlinks => fetch_listed(wiki, identity, CallGroup::Backlinks),
        CallGroup::Categories => fetch_categories(wiki, identity),
        CallGroup::Categorymembers => fetch_listed(wiki, identity, CallGroup::Categorymembers),
    }
}

fn fetch_structured(wiki: &Wikipedia, identity: &PageIdentity) -> Result<GroupPayload> {
    let mut params = query_params(&[("prop", "extracts"), ("titles", &identity.title)]);
    for (key, value) in wiki.rules().query_extras() {
        set_param(&mut params, key, (*value).to_string());
    }

    let mut response = wiki.query(&identity.language, &params)?;
    let mut payload = GroupPayload::default();
    payload.absorb_common(&response.query.fields);

    match take_page(&mut response.query) {
        PageLookup::Missing => payload.missing = true,
        PageLookup::Found(_, record) => {
            payload.absorb_common(&record.fields);
            let extract = record.extract.unwrap_or_default();
            payload.content = GroupContent::Outline(Outline::build(&extract, wiki.rules()));
        }
        PageLookup::Empty => {}
    }

    Ok(payload)
}

fn fetch_info(wiki: &Wikipedia, identity: &PageIdentity) -> Result<GroupPayload> {
    let params = query_params(&[
        ("prop", "info"),
        ("titles", &identity.title),
        ("inprop", INFO_PROPERTIES),
    ]);

    let mut response = wiki.query(&identity.language, &params)?;
    let mut payload = GroupPayload::default();
    payload.absorb_common(&response.query.fields);

    match take_page(&mut response.query) {
        PageLookup::Missing => payload.missing = true,
        PageLookup::Found(_, record) => payload.attributes.extend(record.fields),
        PageLookup::Empty => {}
    }

    Ok(payload)
}

fn fetch_langlinks(wiki: &Wikipedia, identity: &PageIdentity) -> Result<GroupPayload> {
    let params = query_params(&[
        ("prop", "langlinks"),
        ("titles", &identity.title),
        ("lllimit", "500"),
        ("llprop", "url"),
    ]);

    let mut response = wiki.query(&identity.language, &params)?;
    let mut payload = GroupPayload::default();
    payload.absorb_common(&response.query.fields);

    match take_page(&mut response.query) {
        PageLookup::Missing => payload.missing = true,
        PageLookup::Found(_, record) => {
            payload.absorb_common(&record.fields);
            let mut pages = PageMap::new();
            for langlink in record.langlinks {
                let mut page = Page::new(wiki, &langlink.title, 0, &langlink.lang);
                if let Some(url) = langlink.url {
                    page = page.with_attribute("fullurl", Value::from(url));
                }
                pages.insert(langlink.lang, page);
            }
            payload.content = GroupContent::Pages(pages);
        }
        PageLookup::Empty => {}
    }

    Ok(payload)
}

fn fetch_categories(wiki: &Wikipedia, identity: &PageIdentity) -> Result<GroupPayload> {
    let params = query_params(&[
        ("prop", "categories"),
        ("titles", &identity.title),
        ("cllimit", "500"),
    ]);

    let mut response = wiki.query(&identity.language, &params)?;
    let mut payload = GroupPayload::default();
    payload.absorb_common(&response.query.fields);

    match take_page(&mut response.query) {
        PageLookup::Missing => payload.missing = true,
        PageLookup::Found(_, record) => {
            payload.absorb_common(&record.fields);
            payload.content = GroupContent::Pages(reference_pages(
                wiki,
                &identity.language,
                record.categories,
            ));
        }
        PageLookup::Empty => {}
    }

    Ok(payload)
}

fn fetch_links(wiki: &Wikipedia, identity: &PageIdentity) -> Result<GroupPayload> {
    let params = query_params(&[
        ("prop", "links"),
        ("titles", &identity.title),
        ("pllimit", "500"),
    ]);

    let mut payload = GroupPayload::default();
    let mut page_key: Option<String> = None;
    let mut links = Vec::new();

    query_paginated(wiki, &identity.language, CallGroup::Links, params, |mut response| {
        payload.absorb_common(&response.query.fields);

        // Continuations repeat the same page record; follow the key seen first.
        let record = match &page_key {
            Some(key) => response.query.pages.remove(key),
            None => match take_page(&mut response.query) {
                PageLookup::Found(key, record) => {
                    payload.absorb_common(&record.fields);
                    page_key = Some(key);
                    Some(record)
                }
                PageLookup::Missing => {
                    payload.missing = true;
                    return Ok(false);
                }
                PageLookup::Empty => return Ok(false),
            },
        };

        if let Some(record) = record {
            links.extend(record.links);
        }
        Ok(true)
    })?;

    if page_key.is_some() {
        payload.content = GroupContent::Pages(reference_pages(wiki, &identity.language, links));
    }

    Ok(payload)
}

/// Backlinks and category members are `list=` queries: items live on the query itself.
fn fetch_listed(
    wiki: &Wikipedia,
    identity: &PageIdentity,
    group: CallGroup,
) -> Result<GroupPayload> {
    let params = match group {
        CallGroup::Backlinks => query_params(&[
            ("list", "backlinks"),
            ("bltitle", &identity.title),
            ("bllimit", "500"),
        ]),
        _ => query_params(&[
            ("list", "categorymembers"),
            ("cmtitle", &identity.title),
            ("cmlimit", "500"),
        ]),
    };

    let mut payload = GroupPayload::default();
    let mut items = Vec::new();

    query_paginated(wiki, &identity.language, group, params, |response| {
        payload.absorb_common(&response.query.fields);
        let QueryBody {
            backlinks,
            categorymembers,
            ..
        } = response.query;
        match group {
            CallGroup::Backlinks => items.extend(backlinks),
            _ => items.extend(categorymembers),
        }
        Ok(true)
    })?;

    payload.content = GroupContent::Pages(reference_pages(wiki, &identity.language, items));
    Ok(payload)
}

fn reference_pages(wiki: &Wikipedia, language: &str, records: Vec<LinkRecord>) -> PageMap {
    let mut pages = BTreeMap::new();
    for record in records {
        let mut page = Page::new(wiki, &record.title, record.ns, language);
        if let Some(pageid) = record.pageid {
            page = page.with_attribute("pageid", Value::from(pageid));
        }
        pages.insert(record.title, page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_attributes_try_info_first() {
        assert_eq!(groups_for("pageid"), Some(&[Info, Structured, Langlinks][..]));
        assert_eq!(groups_for("fullurl"), Some(&[Info][..]));
        assert_eq!(groups_for("language"), Some(&[][..]));
        assert_eq!(groups_for("colour"), None);
    }

    #[test]
    fn query_params_start_with_action() {
        let params = query_params(&[("prop", "links"), ("titles", "Rust")]);
        assert_eq!(params[0], ("action".to_string(), "query".to_string()));
        assert_eq!(params.len(), 3);
    }
}
