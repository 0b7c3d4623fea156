use serde::Serialize;
use std::fmt;

/// A half-day scheduling unit. The atomic unit of occupancy; there is
/// no sub-slot granularity.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Am,
    Pm,
}

impl Slot {
    /// Both half-day slots, in scan order (AM before PM).
    pub const ALL: [Slot; 2] = [Slot::Am, Slot::Pm];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Am => write!(f, "AM"),
            Slot::Pm => write!(f, "PM"),
        }
    }
}

/// The slot coverage of a booking or session day.
///
/// `Unknown` is the documented fallback for an empty or unrecognized
/// duration string: it is deliberately treated as occupying the full
/// day, so a malformed record can never hide capacity.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSpan {
    Am,
    Pm,
    Full,
    Unknown,
}

impl SlotSpan {
    /// Parses the wire representation of a span.
    ///
    /// Accepts "AM", "PM", "AM&PM" (and the reversed "PM&AM" seen in
    /// older records). Anything else falls back to `Unknown`, which
    /// behaves like a full day; the anomaly is logged, never an error.
    pub fn parse(raw: &str) -> SlotSpan {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AM" => SlotSpan::Am,
            "PM" => SlotSpan::Pm,
            "AM&PM" | "PM&AM" | "FULL" => SlotSpan::Full,
            other => {
                log::warn!("Unrecognized slot span '{}', treating as full day", other);
                SlotSpan::Unknown
            }
        }
    }

    /// Working hours contributed by one day at this span. A training
    /// day is 6 working hours split into two 3-hour halves.
    pub fn hours(&self) -> u32 {
        match self {
            SlotSpan::Am | SlotSpan::Pm => 3,
            SlotSpan::Full | SlotSpan::Unknown => 6,
        }
    }

    /// The half-day slots this span occupies.
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            SlotSpan::Am => &[Slot::Am],
            SlotSpan::Pm => &[Slot::Pm],
            SlotSpan::Full | SlotSpan::Unknown => &Slot::ALL,
        }
    }

    pub fn is_full_day(&self) -> bool {
        matches!(self, SlotSpan::Full | SlotSpan::Unknown)
    }

    /// Canonical wire label.
    pub fn label(&self) -> &'static str {
        match self {
            SlotSpan::Am => "AM",
            SlotSpan::Pm => "PM",
            SlotSpan::Full => "AM&PM",
            SlotSpan::Unknown => "AM&PM",
        }
    }
}

impl fmt::Display for SlotSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
