//! String-keyed tagged records for piece persistence and block-entity payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Int(i32),
    String(String),
    IntArray(Vec<i32>),
    List(Vec<CompoundTag>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundTag {
    entries: BTreeMap<String, Tag>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: &str, value: Tag) -> &mut Self {
        self.entries.insert(key.to_string(), value);
        self
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.put(key, Tag::String(value.into()))
    }

    pub fn put_int(&mut self, key: &str, value: i32) -> &mut Self {
        self.put(key, Tag::Int(value))
    }

    pub fn put_int_array(&mut self, key: &str, value: impl Into<Vec<i32>>) -> &mut Self {
        self.put(key, Tag::IntArray(value.into()))
    }

    pub fn put_list(&mut self, key: &str, value: Vec<CompoundTag>) -> &mut Self {
        self.put(key, Tag::List(value))
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Tag::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.entries.get(key) {
            Some(Tag::Int(v)) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        self.get_int(key).unwrap_or(default)
    }

    pub fn get_int_array(&self, key: &str) -> Option<&[i32]> {
        match self.entries.get(key) {
            Some(Tag::IntArray(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[CompoundTag]> {
        match self.entries.get(key) {
            Some(Tag::List(v)) => Some(v.as_slice()),
            // An empty list has no element type to tell it apart from an int array.
            Some(Tag::IntArray(v)) if v.is_empty() => Some(&[]),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
