//! Severity bands and threshold lookup.
//!
//! A threshold table lists bands in ascending order. Bands are inclusive on
//! both ends and must tile `[0, max_total]` exactly (see
//! [`ThresholdTable::check_partition`]).

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::TestKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately Severe",
            Severity::Severe => "Severe",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub min: u32,
    pub max: u32,
    pub severity: Severity,
    pub description: &'static str,
}

impl Band {
    pub fn contains(&self, total: u32) -> bool {
        self.min <= total && total <= self.max
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("band {index} is inverted ({min} > {max})")]
    Inverted { index: usize, min: u32, max: u32 },

    #[error("no band covers {0}")]
    Gap(u32),

    #[error("more than one band covers {0}")]
    Overlap(u32),

    #[error("bands end at {last} but the maximum total is {max_total}")]
    WrongUpperBound { last: u32, max_total: u32 },
}

/// Bands in ascending order. The top band is held apart so a table can
/// never be empty and every lookup lands on a real band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTable {
    pub max_total: u32,
    pub lower: &'static [Band],
    pub top: Band,
}

impl ThresholdTable {
    /// Verify the bands tile `[0, max_total]` with no gap and no overlap.
    pub fn check_partition(&self) -> Result<(), PartitionError> {
        let mut next = 0u32;
        for (index, band) in self.bands().enumerate() {
            if band.min > band.max {
                return Err(PartitionError::Inverted {
                    index,
                    min: band.min,
                    max: band.max,
                });
            }
            if band.min > next {
                return Err(PartitionError::Gap(next));
            }
            if band.min < next {
                return Err(PartitionError::Overlap(band.min));
            }
            next = band.max + 1;
        }

        if self.top.max != self.max_total {
            return Err(PartitionError::WrongUpperBound {
                last: self.top.max,
                max_total: self.max_total,
            });
        }
        Ok(())
    }

    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.lower.iter().chain(core::iter::once(&self.top))
    }

    /// Band for `total`. Anything no lower band covers, including totals
    /// above `max_total`, lands in the top band.
    pub fn lookup(&self, total: u32) -> &Band {
        let total = total.min(self.max_total);
        self.lower
            .iter()
            .find(|b| b.contains(total))
            .unwrap_or(&self.top)
    }

    pub fn for_kind(kind: TestKind) -> &'static ThresholdTable {
        match kind {
            TestKind::Phq9 => &DEPRESSION,
            TestKind::Gad7 => &ANXIETY,
        }
    }
}

pub static DEPRESSION: ThresholdTable = ThresholdTable {
    max_total: 27,
    lower: &[
        Band { min: 0, max: 4, severity: Severity::Minimal, description: "Minimal depression" },
        Band { min: 5, max: 9, severity: Severity::Mild, description: "Mild depression" },
        Band { min: 10, max: 14, severity: Severity::Moderate, description: "Moderate depression" },
        Band {
            min: 15,
            max: 19,
            severity: Severity::ModeratelySevere,
            description: "Moderately severe depression",
        },
    ],
    top: Band { min: 20, max: 27, severity: Severity::Severe, description: "Severe depression" },
};

pub static ANXIETY: ThresholdTable = ThresholdTable {
    max_total: 21,
    lower: &[
        Band { min: 0, max: 4, severity: Severity::Minimal, description: "Minimal anxiety" },
        Band { min: 5, max: 9, severity: Severity::Mild, description: "Mild anxiety" },
        Band { min: 10, max: 14, severity: Severity::Moderate, description: "Moderate anxiety" },
    ],
    top: Band { min: 15, max: 21, severity: Severity::Severe, description: "Severe anxiety" },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub band: Severity,
    pub description: &'static str,
}

/// Deterministic threshold lookup for a total score.
pub fn classify(total: u32, kind: TestKind) -> Classification {
    let band = ThresholdTable::for_kind(kind).lookup(total);
    Classification {
        band: band.severity,
        description: band.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_are_partitions() {
        assert_eq!(DEPRESSION.check_partition(), Ok(()));
        assert_eq!(ANXIETY.check_partition(), Ok(()));
    }

    #[test]
    fn every_total_matches_exactly_one_band() {
        for table in [&DEPRESSION, &ANXIETY] {
            for total in 0..=table.max_total {
                let hits = table.bands().filter(|b| b.contains(total)).count();
                assert_eq!(hits, 1, "total {total} in table with max {}", table.max_total);
            }
        }
    }

    #[test]
    fn table_maxima_match_questionnaires() {
        for kind in TestKind::ALL {
            assert_eq!(ThresholdTable::for_kind(kind).max_total, kind.questionnaire().max_total());
        }
    }

    #[test]
    fn depression_boundaries() {
        let expect = [
            (0, Severity::Minimal),
            (4, Severity::Minimal),
            (5, Severity::Mild),
            (9, Severity::Mild),
            (10, Severity::Moderate),
            (14, Severity::Moderate),
            (15, Severity::ModeratelySevere),
            (19, Severity::ModeratelySevere),
            (20, Severity::Severe),
            (27, Severity::Severe),
        ];
        for (total, band) in expect {
            assert_eq!(classify(total, TestKind::Phq9).band, band, "total {total}");
        }
    }

    #[test]
    fn anxiety_boundaries() {
        assert_eq!(classify(14, TestKind::Gad7).band, Severity::Moderate);
        assert_eq!(classify(15, TestKind::Gad7).band, Severity::Severe);
        assert_eq!(classify(21, TestKind::Gad7).description, "Severe anxiety");
        assert_eq!(classify(0, TestKind::Gad7).description, "Minimal anxiety");
    }

    #[test]
    fn classify_is_idempotent() {
        for kind in TestKind::ALL {
            for total in 0..=30 {
                assert_eq!(classify(total, kind), classify(total, kind));
            }
        }
    }

    #[test]
    fn totals_above_max_clamp_to_top_band() {
        assert_eq!(classify(100, TestKind::Phq9).band, Severity::Severe);
        assert_eq!(classify(22, TestKind::Gad7).band, Severity::Severe);
    }

    const fn band(min: u32, max: u32) -> Band {
        Band { min, max, severity: Severity::Mild, description: "" }
    }

    #[test]
    fn partition_check_catches_gaps_and_overlaps() {
        static LOW_0_3: [Band; 1] = [band(0, 3)];
        static LOW_0_5: [Band; 1] = [band(0, 5)];

        let table = |lower: &'static [Band], top: Band| ThresholdTable { max_total: 9, lower, top };

        assert_eq!(table(&LOW_0_3, band(5, 9)).check_partition(), Err(PartitionError::Gap(4)));
        assert_eq!(table(&LOW_0_5, band(5, 9)).check_partition(), Err(PartitionError::Overlap(5)));
        assert_eq!(
            table(&[], band(0, 8)).check_partition(),
            Err(PartitionError::WrongUpperBound { last: 8, max_total: 9 })
        );
        assert_eq!(
            table(&[], band(3, 1)).check_partition(),
            Err(PartitionError::Inverted { index: 0, min: 3, max: 1 })
        );
        assert_eq!(table(&[], band(0, 9)).check_partition(), Ok(()));
    }

    #[test]
    fn single_band_table_covers_everything() {
        let only = ThresholdTable { max_total: 9, lower: &[], top: band(0, 9) };
        for total in [0, 4, 9, 50] {
            assert_eq!(only.lookup(total), &only.top);
        }
    }

    #[test]
    fn lookup_returns_the_covering_band() {
        assert_eq!(DEPRESSION.lookup(12).description, "Moderate depression");
        assert_eq!(DEPRESSION.lookup(27), &DEPRESSION.top);
        assert_eq!(ANXIETY.lookup(u32::MAX), &ANXIETY.top);
    }

    #[test]
    fn severity_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Severity::ModeratelySevere).unwrap(),
            "\"Moderately Severe\""
        );
    }
}
