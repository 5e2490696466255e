use std::collections::{BTreeSet, HashMap};

/// The distinct class labels a classifier was trained on, in sorted order.
///
/// Class indices used inside the learners are positions in this list, so a
/// predicted index always maps back to a label seen at fit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDomain {
    values: Vec<String>,
    label_to_index: HashMap<String, usize>,
}

impl LabelDomain {
    pub fn from_labels<'a, I>(labels: I) -> LabelDomain
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        LabelDomain {
            values,
            label_to_index,
        }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.label_to_index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
