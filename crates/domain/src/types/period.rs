//! Report period groupings

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_domain_enum_conversions;

/// How a report window is cut into periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum PeriodGrouping {
    /// One period per local calendar day
    #[default]
    Day,
    /// One period per Monday-to-Sunday week
    Week,
    /// One period per calendar month
    Month,
    /// The raw window as a single period
    Custom,
}

impl_domain_enum_conversions!(PeriodGrouping {
    Day => "day",
    Week => "week",
    Month => "month",
    Custom => "custom",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouping() {
        assert_eq!("Week".parse::<PeriodGrouping>().unwrap(), PeriodGrouping::Week);
        assert_eq!("custom".parse::<PeriodGrouping>().unwrap(), PeriodGrouping::Custom);
        assert!("fortnight".parse::<PeriodGrouping>().is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&PeriodGrouping::Month).unwrap();
        assert_eq!(json, format!("\"{}\"", PeriodGrouping::Month));
    }
}
