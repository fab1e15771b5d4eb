/*
[INPUT]:  Caller-selected cache policy for a single request
[OUTPUT]: Cache-control request headers for the transport
[POS]:    HTTP layer - cache policy pass-through (no local caching)
[UPDATE]: When adding cache policies
*/

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};

/// How the HTTP layer should treat cached responses for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Let the transport and intermediaries apply the protocol's rules
    #[default]
    UseProtocolCachePolicy,
    /// Always revalidate with the origin server
    ReloadIgnoringCacheData,
    /// Accept stale cached data, loading from the origin otherwise
    ReturnCacheDataElseLoad,
    /// Only accept cached data
    ReturnCacheDataDontLoad,
}

impl CachePolicy {
    pub(crate) fn apply(self, headers: &mut HeaderMap) {
        match self {
            CachePolicy::UseProtocolCachePolicy => {}
            CachePolicy::ReloadIgnoringCacheData => {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
                headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
            }
            CachePolicy::ReturnCacheDataElseLoad => {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-stale"));
            }
            CachePolicy::ReturnCacheDataDontLoad => {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("only-if-cached"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_adds_nothing() {
        let mut headers = HeaderMap::new();
        CachePolicy::default().apply(&mut headers);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_reload_policy_headers() {
        let mut headers = HeaderMap::new();
        CachePolicy::ReloadIgnoringCacheData.apply(&mut headers);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
    }

    #[test]
    fn test_cache_only_policy_header() {
        let mut headers = HeaderMap::new();
        CachePolicy::ReturnCacheDataDontLoad.apply(&mut headers);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "only-if-cached");
    }
}
