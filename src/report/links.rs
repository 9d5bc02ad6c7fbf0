//! Serde glue for the `links` object of a report
//!
//! Reports keep their links in a `Vec` so discovery order survives the trip
//! to JSON. These helpers write that `Vec` as a JSON object keyed by link URL
//! and read it back without reordering.

use super::LinkInfo;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Borrowed view that serializes links as `{"<url>": LinkInfo, ...}`
pub(super) struct LinkMap<'a>(pub(super) &'a [LinkInfo]);

impl Serialize for LinkMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in self.0 {
            map.serialize_entry(&link.url, link)?;
        }
        map.end()
    }
}

/// Ordered `(key, LinkInfo)` pairs read from a `links` object
#[derive(Default)]
pub(super) struct LinkEntries(pub(super) Vec<(String, LinkInfo)>);

impl<'de> Deserialize<'de> for LinkEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = LinkEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of link URLs to link information")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, info)) = access.next_entry::<String, LinkInfo>()? {
                    entries.push((key, info));
                }
                Ok(LinkEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
