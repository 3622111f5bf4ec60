//! Most dangerous streets per affected class.

use crate::data::{AffectedClass, DatasetView};
use serde::Serialize;
use std::cmp::Reverse;

pub const TOP_STREETS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreetCount {
    pub street: String,
    pub count: u32,
}

/// Streets of the records with the most injured persons of `class`.
///
/// Only records with at least one injury of that class and a known street
/// qualify. Ties keep their input order.
pub fn top_streets(view: &DatasetView<'_>, class: AffectedClass, limit: usize) -> Vec<StreetCount> {
    let mut ranked: Vec<StreetCount> = view
        .records()
        .filter_map(|r| {
            let count = r.injured(class).filter(|&n| n >= 1)?;
            let street = r.on_street_name.as_ref()?;
            Some(StreetCount {
                street: street.clone(),
                count,
            })
        })
        .collect();

    ranked.sort_by_key(|s| Reverse(s.count));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{dataset, record};
    use crate::data::CollisionRecord;

    fn street(name: Option<&str>, pedestrians: Option<u32>, cyclists: u32) -> CollisionRecord {
        let mut r = record(12, 0);
        r.on_street_name = name.map(str::to_string);
        r.injured_pedestrians = pedestrians;
        r.injured_cyclists = Some(cyclists);
        r
    }

    fn pairs(ranked: &[StreetCount]) -> Vec<(&str, u32)> {
        ranked.iter().map(|s| (s.street.as_str(), s.count)).collect()
    }

    #[test]
    fn ranks_pedestrian_injuries() {
        let ds = dataset(vec![
            street(Some("A"), Some(3), 0),
            street(Some("B"), Some(1), 0),
            street(Some("C"), Some(0), 0),
            street(Some("D"), Some(5), 0),
        ]);
        let ranked = top_streets(&ds.view(), AffectedClass::Pedestrians, TOP_STREETS_LIMIT);
        assert_eq!(pairs(&ranked), vec![("D", 5), ("A", 3), ("B", 1)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ds = dataset(vec![
            street(Some("first"), None, 2),
            street(Some("big"), None, 4),
            street(Some("second"), None, 2),
            street(Some("third"), None, 2),
        ]);
        let ranked = top_streets(&ds.view(), AffectedClass::Cyclists, 3);
        assert_eq!(pairs(&ranked), vec![("big", 4), ("first", 2), ("second", 2)]);
    }

    #[test]
    fn drops_unknown_streets_and_counts() {
        let ds = dataset(vec![
            street(None, Some(9), 0),
            street(Some("known"), None, 0),
            street(Some("kept"), Some(1), 0),
        ]);
        let ranked = top_streets(&ds.view(), AffectedClass::Pedestrians, TOP_STREETS_LIMIT);
        assert_eq!(pairs(&ranked), vec![("kept", 1)]);
        assert!(top_streets(&ds.view(), AffectedClass::Motorists, TOP_STREETS_LIMIT).is_empty());
    }

    #[test]
    fn respects_limit_and_order() {
        let records = (0..12)
            .map(|i| street(Some(format!("street {i}").as_str()), Some(i % 4 + 1), 0))
            .collect();
        let ds = dataset(records);
        let ranked = top_streets(&ds.view(), AffectedClass::Pedestrians, TOP_STREETS_LIMIT);
        assert_eq!(ranked.len(), TOP_STREETS_LIMIT);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(ranked[0].street, "street 3");
    }
}
