#![forbid(unsafe_code)]

//! Upstream snapshot producers.
//!
//! A [`SnapshotSource`] yields the complete key/value state of a storage area.
//! How it was obtained (IPC, disk, network) is the source's business; the
//! model only ever receives whole snapshots.
//!
//! With the `serde` feature, snapshots can be read from a JSON object whose
//! member order becomes row order.

use crate::entries::OrderedEntries;
use crate::error::Result;
use crate::local_storage::LocalStorageModel;

/// Producer of full storage snapshots.
pub trait SnapshotSource {
    fn snapshot(&self) -> Result<OrderedEntries>;
}

impl SnapshotSource for OrderedEntries {
    fn snapshot(&self) -> Result<OrderedEntries> {
        Ok(self.clone())
    }
}

impl LocalStorageModel {
    /// Pull a snapshot from `source` and replace the table with it.
    ///
    /// On error the model is left untouched and no events are emitted.
    pub fn load<S: SnapshotSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let items = source.snapshot()?;
        self.set_items(items);
        Ok(())
    }
}

#[cfg(feature = "serde")]
pub use json::{JsonFileSource, SnapshotOptions};

#[cfg(feature = "serde")]
mod json {
    use std::fmt;
    use std::path::{Path, PathBuf};

    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
    use serde_json::Value;

    use super::SnapshotSource;
    use crate::entries::OrderedEntries;
    use crate::error::{Result, SnapshotError};

    /// How JSON snapshots are turned into entries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SnapshotOptions {
        /// Reject repeated keys instead of letting the last value win.
        pub strict: bool,
        /// Stringify numbers and booleans; map `null` to an empty string.
        pub coerce_scalars: bool,
    }

    impl Default for SnapshotOptions {
        fn default() -> Self {
            Self {
                strict: false,
                coerce_scalars: true,
            }
        }
    }

    impl SnapshotOptions {
        fn convert(&self, pairs: Vec<(String, Value)>) -> Result<OrderedEntries> {
            let mut entries = OrderedEntries::with_capacity(pairs.len());
            for (key, value) in pairs {
                let text = match value {
                    Value::String(s) => s,
                    other if !self.coerce_scalars => {
                        return Err(SnapshotError::NonStringValue {
                            key,
                            kind: kind_of(&other),
                        });
                    }
                    Value::Null => String::new(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other @ (Value::Array(_) | Value::Object(_)) => {
                        return Err(SnapshotError::NonStringValue {
                            key,
                            kind: kind_of(&other),
                        });
                    }
                };
                if self.strict && entries.contains_key(&key) {
                    return Err(SnapshotError::DuplicateKey { key });
                }
                entries.insert(key, text);
            }
            Ok(entries)
        }
    }

    fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Object members in document order, duplicates included.
    struct RawPairs(Vec<(String, Value)>);

    impl<'de> Deserialize<'de> for RawPairs {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct PairsVisitor;

            impl<'de> Visitor<'de> for PairsVisitor {
                type Value = RawPairs;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a JSON object of storage entries")
                }

                fn visit_map<A>(self, mut map: A) -> std::result::Result<RawPairs, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                    while let Some(pair) = map.next_entry::<String, Value>()? {
                        pairs.push(pair);
                    }
                    Ok(RawPairs(pairs))
                }
            }

            deserializer.deserialize_map(PairsVisitor)
        }
    }

    impl OrderedEntries {
        /// Parse a JSON object into entries, keeping member order.
        pub fn from_json_str(json: &str, options: &SnapshotOptions) -> Result<Self> {
            let RawPairs(pairs) = serde_json::from_str(json)?;
            options.convert(pairs)
        }

        /// Like [`OrderedEntries::from_json_str`], reading from `reader`.
        pub fn from_json_reader<R: std::io::Read>(
            reader: R,
            options: &SnapshotOptions,
        ) -> Result<Self> {
            let RawPairs(pairs) = serde_json::from_reader(reader)?;
            options.convert(pairs)
        }
    }

    impl<'de> Deserialize<'de> for OrderedEntries {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let RawPairs(pairs) = RawPairs::deserialize(deserializer)?;
            SnapshotOptions::default()
                .convert(pairs)
                .map_err(de::Error::custom)
        }
    }

    /// Snapshot read from a JSON file on every request.
    #[derive(Debug, Clone)]
    pub struct JsonFileSource {
        path: PathBuf,
        options: SnapshotOptions,
    }

    impl JsonFileSource {
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                options: SnapshotOptions::default(),
            }
        }

        #[must_use]
        pub fn with_options(mut self, options: SnapshotOptions) -> Self {
            self.options = options;
            self
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SnapshotSource for JsonFileSource {
        fn snapshot(&self) -> Result<OrderedEntries> {
            let text = std::fs::read_to_string(&self.path)
                .map_err(|source| SnapshotError::io(&self.path, source))?;
            OrderedEntries::from_json_str(&text, &self.options)
        }
    }
}
