//! Shared query infrastructure: the [`Query`] trait and the ISS envelope parameters.

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Appends the parameters every ISS request carries. The `metadata` block
/// is never used, so it is switched off.
pub(crate) fn with_envelope(url: &Url) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("iss.meta", "off");
    url
}
