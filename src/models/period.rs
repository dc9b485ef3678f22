use clap::ValueEnum;
use serde::Serialize;

/// Trailing window used by the chart views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ChartPeriod {
    #[default]
    #[value(name = "7", alias = "7days")]
    Week,
    #[value(name = "14", alias = "14days")]
    Fortnight,
    #[value(name = "30", alias = "30days")]
    Month,
}

impl ChartPeriod {
    pub fn days(&self) -> u32 {
        match self {
            ChartPeriod::Week => 7,
            ChartPeriod::Fortnight => 14,
            ChartPeriod::Month => 30,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(ChartPeriod::Week),
            14 => Some(ChartPeriod::Fortnight),
            30 => Some(ChartPeriod::Month),
            _ => None,
        }
    }
}
