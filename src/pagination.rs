use anyhow::Result;
use tracing::debug;

use crate::client::Wikipedia;
use crate::groups::CallGroup;
use crate::model::QueryResponse;
use crate::transport::QueryParams;
use crate::util::{param_value, set_param};

/// Issues `params` and follows `continue` tokens until the source reports no more results.
pub(crate) fn query_paginated<F>(
    wiki: &Wikipedia,
    language: &str,
    group: CallGroup,
    mut params: QueryParams,
    mut on_batch: F,
) -> Result<()>
where
    F: FnMut(QueryResponse) -> Result<bool>,
{
    let mut batches = 0;

    loop {
        let mut response = wiki.query(language, &params)?;
        batches += 1;

        let continuation = response.continuation.take();
        if !on_batch(response)? {
            break;
        }

        let Some(continuation) = continuation.filter(|tokens| !tokens.is_empty()) else {
            break;
        };
        for (key, value) in &continuation {
            set_param(&mut params, key, param_value(value));
        }
        debug!(group = group.as_str(), batch = batches, "following continuation");
    }

    Ok(())
}
