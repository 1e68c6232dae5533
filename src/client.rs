use std::fmt;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::config::WikiConfig;
use crate::format::{ExtractFormat, FormatRules};
use crate::model::QueryResponse;
use crate::namespace::Namespace;
use crate::page::Page;
use crate::transport::{HttpTransport, Transport};
use crate::util::normalize_language;

/// Handle to one Wikipedia edition.
///
/// Cloning is cheap; every [`Page`] keeps a clone so it can resolve itself later.
#[derive(Clone)]
pub struct Wikipedia {
    shared: Rc<Shared>,
}

struct Shared {
    language: String,
    rules: FormatRules,
    transport: Box<dyn Transport>,
}

impl Wikipedia {
    pub fn new(config: WikiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: WikiConfig, transport: impl Transport + 'static) -> Result<Self> {
        let rules = FormatRules::new(config.extract_format)?;

        Ok(Self {
            shared: Rc::new(Shared {
                language: normalize_language(&config.language),
                rules,
                transport: Box::new(transport),
            }),
        })
    }

    pub fn language(&self) -> &str {
        &self.shared.language
    }

    pub fn extract_format(&self) -> ExtractFormat {
        self.shared.rules.format()
    }

    pub fn rules(&self) -> &FormatRules {
        &self.shared.rules
    }

    pub fn page(&self, title: &str) -> Page {
        self.page_in(title, Namespace::Main)
    }

    pub fn page_in(&self, title: &str, namespace: impl Into<i64>) -> Page {
        Page::new(self, title, namespace.into(), self.language())
    }

    pub fn article(&self, title: &str) -> Page {
        self.page(title)
    }

    pub(crate) fn query(&self, language: &str, params: &[(String, String)]) -> Result<QueryResponse> {
        let payload = self.shared.transport.send(language, params)?;
        serde_json::from_value(payload).context("failed to parse MediaWiki query response")
    }
}

impl fmt::Debug for Wikipedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wikipedia")
            .field("language", &self.shared.language)
            .field("extract_format", &self.shared.rules.format())
            .finish()
    }
}
