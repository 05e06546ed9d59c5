use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionCount {
    pub description: String,
    pub count: usize,
}

/// `HH:MM:SS` key for a timestamp; the date is dropped.
pub fn time_of_day(t: &NaiveDateTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Errors per time of day. Keys are zero-padded so map order is clock order.
pub fn count_by_time_of_day(times: &[NaiveDateTime]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for t in times {
        *counts.entry(time_of_day(t)).or_insert(0) += 1;
    }
    counts
}

/// description -> time of day -> count. `times` and `descriptions` are
/// parallel; extra entries on either side are ignored.
pub fn count_by_description_and_time<S: AsRef<str>>(
    times: &[NaiveDateTime],
    descriptions: &[S],
) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut out: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for (t, d) in times.iter().zip(descriptions) {
        *out.entry(d.as_ref().to_string())
            .or_default()
            .entry(time_of_day(t))
            .or_insert(0) += 1;
    }
    out
}

/// Errors per exact timestamp, in time order.
pub fn count_by_timestamp(times: &[NaiveDateTime]) -> BTreeMap<NaiveDateTime, usize> {
    let mut counts = BTreeMap::new();
    for t in times {
        *counts.entry(*t).or_insert(0) += 1;
    }
    counts
}

/// Occurrences of each exact description, most frequent first.
pub fn description_counts<S: AsRef<str>>(descriptions: &[S]) -> Vec<DescriptionCount> {
    descriptions
        .iter()
        .map(|d| d.as_ref())
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(description, count)| DescriptionCount { description: description.to_string(), count })
        .collect()
}
