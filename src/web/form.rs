//! `application/x-www-form-urlencoded` bodies with repeated keys.
//!
//! List fields arrive as repeated keys (`subtask_title[]=a&subtask_title[]=b`),
//! which a plain struct deserializer cannot express, so the body is kept as
//! ordered pairs.

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// Last value submitted for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Last value for `key`, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Every value submitted for `key`, in submission order.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
    }

    pub fn get_owned_list(&self, key: &str) -> Vec<String> {
        self.get_list(key).into_iter().map(str::to_string).collect()
    }
}
