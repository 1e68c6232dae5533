//! Lazily resolved page objects.

use std::cell::{OnceCell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anyhow::{Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::client::Wikipedia;
use crate::groups::{self, CallGroup, GroupContent, GroupPayload, PageIdentity};
use crate::outline::Outline;
use crate::section::SectionRef;

/// Page id the API reports for titles that do not exist.
pub const MISSING_PAGE_ID: i64 = -1;

pub type PageMap = BTreeMap<String, Page>;

pub struct Page {
    wiki: Wikipedia,
    state: RefCell<PageState>,
    outline: OnceCell<Outline>,
    collections: Collections,
}

#[derive(Default)]
struct PageState {
    attributes: Map<String, Value>,
    resolved: BTreeSet<CallGroup>,
}

#[derive(Default)]
struct Collections {
    langlinks: OnceCell<PageMap>,
    links: OnceCell<PageMap>,
    backlinks: OnceCell<PageMap>,
    categories: OnceCell<PageMap>,
    categorymembers: OnceCell<PageMap>,
}

impl Collections {
    fn slot(&self, group: CallGroup) -> Option<&OnceCell<PageMap>> {
        match group {
            CallGroup::Langlinks => Some(&self.langlinks),
            CallGroup::Links => Some(&self.links),
            CallGroup::Backlinks => Some(&self.backlinks),
            CallGroup::Categories => Some(&self.categories),
            CallGroup::Categorymembers => Some(&self.categorymembers),
            CallGroup::Structured | CallGroup::Info => None,
        }
    }
}

impl Page {
    pub(crate) fn new(wiki: &Wikipedia, title: &str, namespace: i64, language: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert("title".to_string(), Value::from(title));
        attributes.insert("ns".to_string(), Value::from(namespace));
        attributes.insert("language".to_string(), Value::from(language));

        Self {
            wiki: wiki.clone(),
            state: RefCell::new(PageState {
                attributes,
                resolved: BTreeSet::new(),
            }),
            outline: OnceCell::new(),
            collections: Collections::default(),
        }
    }

    pub(crate) fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.state
            .get_mut()
            .attributes
            .insert(name.to_string(), value);
        self
    }

    pub fn title(&self) -> String {
        self.cached_str("title").unwrap_or_default()
    }

    pub fn namespace(&self) -> i64 {
        self.cached("ns").and_then(|value| value.as_i64()).unwrap_or(0)
    }

    pub fn language(&self) -> String {
        self.cached_str("language").unwrap_or_default()
    }

    pub fn pageid(&self) -> Result<Option<i64>> {
        Ok(self.attribute("pageid")?.and_then(|value| value.as_i64()))
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.pageid()? != Some(MISSING_PAGE_ID))
    }

    /// Reads a named attribute, running the first unresolved group that supplies it.
    ///
    /// Fails only for names outside the attribute table. Attributes the source did not
    /// report, including everything but `pageid` on a missing page, read as `None`.
    pub fn attribute(&self, name: &str) -> Result<Option<Value>> {
        let Some(candidates) = groups::groups_for(name) else {
            bail!("unknown page attribute `{name}`");
        };

        if let Some(value) = self.cached(name) {
            return Ok(Some(value));
        }

        if let Some(&group) = candidates.iter().find(|&&group| !self.is_resolved(group)) {
            self.resolve(group)?;
        }

        Ok(self.cached(name))
    }

    pub fn fullurl(&self) -> Result<Option<String>> {
        self.string_attribute("fullurl")
    }

    pub fn canonicalurl(&self) -> Result<Option<String>> {
        self.string_attribute("canonicalurl")
    }

    pub fn displaytitle(&self) -> Result<Option<String>> {
        self.string_attribute("displaytitle")
    }

    pub fn contentmodel(&self) -> Result<Option<String>> {
        self.string_attribute("contentmodel")
    }

    pub fn touched(&self) -> Result<Option<String>> {
        self.string_attribute("touched")
    }

    pub fn length(&self) -> Result<Option<i64>> {
        Ok(self.attribute("length")?.and_then(|value| value.as_i64()))
    }

    pub fn lastrevid(&self) -> Result<Option<i64>> {
        Ok(self.attribute("lastrevid")?.and_then(|value| value.as_i64()))
    }

    pub fn talkid(&self) -> Result<Option<i64>> {
        Ok(self.attribute("talkid")?.and_then(|value| value.as_i64()))
    }

    pub fn outline(&self) -> Result<&Outline> {
        self.resolve(CallGroup::Structured)?;
        Ok(self.outline.get_or_init(Outline::default))
    }

    pub fn summary(&self) -> Result<&str> {
        Ok(self.outline()?.summary())
    }

    pub fn sections(&self) -> Result<Vec<SectionRef<'_>>> {
        Ok(self.outline()?.sections())
    }

    pub fn section_titles(&self) -> Result<&[String]> {
        Ok(self.outline()?.section_titles())
    }

    pub fn section_by_title(&self, title: &str) -> Result<Option<SectionRef<'_>>> {
        Ok(self.outline()?.section_by_title(title))
    }

    pub fn text(&self) -> Result<String> {
        Ok(self.outline()?.render(self.wiki.rules()))
    }

    pub fn langlinks(&self) -> Result<&PageMap> {
        self.collection(CallGroup::Langlinks)
    }

    pub fn links(&self) -> Result<&PageMap> {
        self.collection(CallGroup::Links)
    }

    pub fn backlinks(&self) -> Result<&PageMap> {
        self.collection(CallGroup::Backlinks)
    }

    pub fn categories(&self) -> Result<&PageMap> {
        self.collection(CallGroup::Categories)
    }

    pub fn categorymembers(&self) -> Result<&PageMap> {
        self.collection(CallGroup::Categorymembers)
    }

    pub fn is_resolved(&self, group: CallGroup) -> bool {
        self.state.borrow().resolved.contains(&group)
    }

    /// Runs `group` unless it already ran. A failed fetch leaves the group unresolved.
    pub fn resolve(&self, group: CallGroup) -> Result<()> {
        if self.is_resolved(group) {
            return Ok(());
        }

        let payload = if self.is_known_missing() {
            debug!(
                title = %self.title(),
                group = group.as_str(),
                "page does not exist, skipping request"
            );
            GroupPayload::missing()
        } else {
            let identity = PageIdentity {
                title: self.title(),
                language: self.language(),
            };
            groups::fetch(&self.wiki, group, &identity)?
        };

        self.commit(group, payload);
        Ok(())
    }

    fn commit(&self, group: CallGroup, payload: GroupPayload) {
        let GroupPayload {
            attributes,
            missing,
            content,
        } = payload;

        match content {
            GroupContent::Outline(outline) => {
                let stored = self.outline.set(outline);
                debug_assert!(stored.is_ok(), "outline committed twice");
            }
            GroupContent::Pages(pages) => {
                if let Some(slot) = self.collections.slot(group) {
                    let stored = slot.set(pages);
                    debug_assert!(stored.is_ok(), "{} committed twice", group.as_str());
                }
            }
            GroupContent::Nothing => {}
        }

        let mut state = self.state.borrow_mut();
        state.attributes.extend(attributes);
        if missing {
            state
                .attributes
                .insert("pageid".to_string(), Value::from(MISSING_PAGE_ID));
        }
        state.resolved.insert(group);

        info!(
            title = %state.attributes.get("title").and_then(serde_json::Value::as_str).unwrap_or_default(),
            group = group.as_str(),
            pageid = ?state.attributes.get("pageid").and_then(serde_json::Value::as_i64),
            missing,
            "resolved call group"
        );
    }

    fn collection(&self, group: CallGroup) -> Result<&PageMap> {
        self.resolve(group)?;
        match self.collections.slot(group) {
            Some(slot) => Ok(slot.get_or_init(PageMap::new)),
            None => bail!("call group `{}` does not produce pages", group.as_str()),
        }
    }

    fn is_known_missing(&self) -> bool {
        self.cached("pageid").and_then(|value| value.as_i64()) == Some(MISSING_PAGE_ID)
    }

    fn cached(&self, name: &str) -> Option<Value> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn cached_str(&self, name: &str) -> Option<String> {
        self.cached(name)
            .and_then(|value| value.as_str().map(ToOwned::to_owned))
    }

    fn string_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .attribute(name)?
            .and_then(|value| value.as_str().map(ToOwned::to_owned)))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let title = state
            .attributes
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let namespace = state
            .attributes
            .get("ns")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let pageid = state.attributes.get("pageid").and_then(Value::as_i64);

        match pageid {
            Some(pageid) if !state.resolved.is_empty() => {
                write!(f, "{title} (id: {pageid}, ns: {namespace})")
            }
            _ => write!(f, "{title} (id: ??, ns: {namespace})"),
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Page")
            .field("attributes", &state.attributes)
            .field("resolved", &state.resolved)
            .finish()
    }
}
