//! Deterministic request assembly.

use indexmap::IndexMap;
use tracing::debug;
use url::Url;

use crate::{Body, Method, Request, Result, Store};

/// Parses the base address, merges the accumulated query parameters into it,
/// and builds the immutable request.
pub(crate) fn assemble(
    method: Method,
    base: &str,
    headers: &Store,
    params: &Store,
    body: Option<Body>,
) -> Result<Request> {
    let mut url = Url::parse(base)?;
    merge_query(&mut url, params);
    debug!(method = %method, url = %url, "assembled request");
    Ok(Request::new(method, url, headers.clone(), body))
}

/// Merges `params` into the URL's existing query component.
///
/// Existing query values stay ahead of accumulated ones under the same key;
/// nothing is replaced. The result is re-encoded with keys sorted and
/// per-key value order preserved.
fn merge_query(url: &mut Url, params: &Store) {
    let mut merged: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in url.query_pairs() {
        merged
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    for (key, values) in params.iter() {
        merged
            .entry(key.to_owned())
            .or_default()
            .extend(values.iter().cloned());
    }

    if merged.is_empty() {
        url.set_query(None);
        return;
    }

    merged.sort_keys();
    let mut encoder = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &merged {
        for value in values {
            encoder.append_pair(key, value);
        }
    }
    url.set_query(Some(&encoder.finish()));
}
