//! Grouping flat catalog rows into star systems.

use std::collections::HashMap;

use crate::record::{ExoplanetRecord, StarId};

/// All catalog records that share a host star.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    /// Host star identifier.
    pub star_id: StarId,
    /// Records in their original relative order.
    pub records: Vec<ExoplanetRecord>,
}

impl StarSystem {
    /// Number of planets (records) in the system.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A system always has at least one record once grouped, but a
    /// hand-built one may not.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group records by `kepid`.
///
/// Systems come out in order of each star's first appearance, and records
/// keep their relative order inside a system. Every input record lands in
/// exactly one system; empty input yields no systems.
pub fn group_by_star(records: &[ExoplanetRecord]) -> Vec<StarSystem> {
    let mut index_of: HashMap<StarId, usize> = HashMap::new();
    let mut systems: Vec<StarSystem> = Vec::new();

    for record in records {
        let slot = *index_of.entry(record.kepid).or_insert_with(|| {
            systems.push(StarSystem {
                star_id: record.kepid,
                records: Vec::new(),
            });
            systems.len() - 1
        });
        systems[slot].records.push(record.clone());
    }

    tracing::debug!(
        records = records.len(),
        systems = systems.len(),
        "grouped catalog by star"
    );
    systems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kepid: u64, name: &str) -> ExoplanetRecord {
        ExoplanetRecord {
            kepoi_name: Some(name.to_string()),
            ..ExoplanetRecord::new(kepid)
        }
    }

    #[test]
    fn test_empty_input_yields_no_systems() {
        assert!(group_by_star(&[]).is_empty());
    }

    #[test]
    fn test_two_stars_sizes_two_and_one() {
        let data = vec![record(1, "a"), record(1, "b"), record(2, "c")];
        let systems = group_by_star(&data);
        assert_eq!(systems.len(), 2);
        assert_eq!(systems[0].star_id, StarId(1));
        assert_eq!(systems[0].len(), 2);
        assert_eq!(systems[1].star_id, StarId(2));
        assert_eq!(systems[1].len(), 1);
    }

    #[test]
    fn test_relative_order_preserved_within_system() {
        let data = vec![
            record(5, "first"),
            record(9, "other"),
            record(5, "second"),
            record(5, "third"),
        ];
        let systems = group_by_star(&data);
        let names: Vec<_> = systems[0]
            .records
            .iter()
            .map(|r| r.kepoi_name.clone().unwrap())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_systems_follow_first_appearance() {
        let data = vec![record(30, "x"), record(10, "y"), record(20, "z"), record(10, "w")];
        let ids: Vec<_> = group_by_star(&data).iter().map(|s| s.star_id.0).collect();
        assert_eq!(ids, [30, 10, 20]);
    }

    #[test]
    fn test_grouping_is_lossless() {
        let data: Vec<_> = (0..200)
            .map(|i| record((i * 7 % 13) as u64, &format!("koi-{i}")))
            .collect();
        let systems = group_by_star(&data);

        let total: usize = systems.iter().map(StarSystem::len).sum();
        assert_eq!(total, data.len());

        for system in &systems {
            assert!(system.records.iter().all(|r| r.kepid == system.star_id));
        }

        let mut flattened: Vec<_> = systems
            .iter()
            .flat_map(|s| s.records.iter().map(|r| r.kepoi_name.clone()))
            .collect();
        let mut original: Vec<_> = data.iter().map(|r| r.kepoi_name.clone()).collect();
        flattened.sort();
        original.sort();
        assert_eq!(flattened, original);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let data = vec![record(3, "a"), record(4, "b"), record(3, "c")];
        assert_eq!(group_by_star(&data), group_by_star(&data));
    }
}
