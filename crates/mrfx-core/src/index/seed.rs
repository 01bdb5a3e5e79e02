//! serde `DeserializeSeed` plumbing for the one-record-at-a-time parse.

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

use super::IndexRecord;

/// Seed for the top-level object: walks its keys, streams the target array
/// through the callback, and ignores everything else.
pub(super) struct IndexDocument<'a, F> {
    pub array_field: &'a str,
    pub on_record: &'a mut F,
}

impl<'de, 'a, F> DeserializeSeed<'de> for IndexDocument<'a, F>
where
    F: FnMut(IndexRecord),
{
    type Value = u64;

    fn deserialize<D>(self, deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'a, F> Visitor<'de> for IndexDocument<'a, F>
where
    F: FnMut(IndexRecord),
{
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a top-level object with a `{}` array", self.array_field)
    }

    fn visit_map<A>(self, mut map: A) -> Result<u64, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut count = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == self.array_field {
                count = Some(map.next_value_seed(RecordArray {
                    on_record: &mut *self.on_record,
                })?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        count.ok_or_else(|| {
            de::Error::custom(format!("missing `{}` array", self.array_field))
        })
    }
}

/// Seed for the record array itself: one `IndexRecord` per element, handed to
/// the callback and dropped before the next element is touched.
struct RecordArray<'a, F> {
    on_record: &'a mut F,
}

impl<'de, 'a, F> DeserializeSeed<'de> for RecordArray<'a, F>
where
    F: FnMut(IndexRecord),
{
    type Value = u64;

    fn deserialize<D>(self, deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'a, F> Visitor<'de> for RecordArray<'a, F>
where
    F: FnMut(IndexRecord),
{
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array of reporting records")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<u64, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut count = 0u64;
        while let Some(record) = seq.next_element::<IndexRecord>()? {
            (self.on_record)(record);
            count += 1;
        }
        Ok(count)
    }
}
