use crate::error::ProximityParseError;
use crate::index::PositionalIndex;
use crate::tokenizer::Normalizer;
use crate::{DocId, Position};
use std::collections::BTreeSet;

/// `term1 term2 /k`: both terms occur within `k` positions of each other, in
/// either order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityQuery {
    pub first: String,
    pub second: String,
    pub distance: u32,
}

impl ProximityQuery {
    /// Parse a raw query. Terms are stemmed but otherwise left alone: no
    /// stopword removal and no segmentation.
    pub fn parse(raw: &str, normalizer: &Normalizer) -> Result<Self, ProximityParseError> {
        let mut parts = raw.split('/');
        let head = parts.next().unwrap_or_default();
        let tail = parts.next().ok_or(ProximityParseError::MissingDistance)?;
        if parts.next().is_some() {
            return Err(ProximityParseError::ExtraSlash);
        }

        let terms: Vec<&str> = head.split_whitespace().collect();
        if terms.len() != 2 {
            return Err(ProximityParseError::OperandCount { found: terms.len() });
        }
        let value = tail.trim();
        let distance = value
            .parse::<u32>()
            .map_err(|_| ProximityParseError::InvalidDistance { value: value.to_string() })?;

        Ok(Self { first: normalizer.stem(terms[0]), second: normalizer.stem(terms[1]), distance })
    }

    /// Documents holding a pair of positions with `0 < |p1 - p2| <= distance`.
    pub fn evaluate(&self, index: &PositionalIndex) -> BTreeSet<DocId> {
        let (Some(first), Some(second)) = (index.postings(&self.first), index.postings(&self.second)) else {
            return BTreeSet::new();
        };
        first
            .iter()
            .filter_map(|(doc_id, p1)| {
                let p2 = second.get(doc_id)?;
                within(p1, p2, self.distance).then(|| doc_id.clone())
            })
            .collect()
    }
}

/// Both slices ascending. For each `a` scan only the part of `b` inside
/// `[a - k, a + k]`; an equal position is never a match.
fn within(a: &[Position], b: &[Position], k: u32) -> bool {
    if k == 0 {
        return false;
    }
    a.iter().any(|&x| {
        let lo = x.saturating_sub(k);
        let hi = x.saturating_add(k);
        let start = b.partition_point(|&y| y < lo);
        b[start..].iter().take_while(|&&y| y <= hi).any(|&y| y != x)
    })
}
