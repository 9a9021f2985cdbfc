use std::collections::HashMap;

use http::{HeaderMap, Request};

/// Read-only access to request headers. Names are matched case-insensitively.
pub trait HeaderView {
    fn get(&self, name: &str) -> Option<&str>;

    /// Every value of a repeated header, in arrival order.
    fn get_all(&self, name: &str) -> Vec<&str> {
        self.get(name).into_iter().collect()
    }
}

impl HeaderView for HeaderMap {
    fn get(&self, name: &str) -> Option<&str> {
        HeaderMap::get(self, name).and_then(|v| v.to_str().ok())
    }

    fn get_all(&self, name: &str) -> Vec<&str> {
        HeaderMap::get_all(self, name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

impl<B> HeaderView for Request<B> {
    fn get(&self, name: &str) -> Option<&str> {
        HeaderView::get(self.headers(), name)
    }

    fn get_all(&self, name: &str) -> Vec<&str> {
        HeaderView::get_all(self.headers(), name)
    }
}

// Keys are expected lowercase, as a parsed request stores them.
impl HeaderView for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, &name.to_ascii_lowercase()).map(String::as_str)
    }
}
