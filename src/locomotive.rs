//! Fleet taxonomy: locomotive classes, display names, and livery variants.
//!
//! Running numbers are assigned in class blocks, so the class of a
//! locomotive can be derived from its number alone. The allocation plans
//! only carry numbers; everything else here is derived.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Locomotive class, derived from the running number.
///
/// The serialized names double as the `category` values in the
/// `categorized_locomotives` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LocomotiveCategory {
    #[serde(rename = "Ge_44_1")]
    Ge44I,
    #[serde(rename = "Ge_44_2")]
    Ge44II,
    #[serde(rename = "Ge_44_3")]
    Ge44III,
    #[serde(rename = "Gem_44_1")]
    Gem44,
    #[serde(rename = "ABe_812_1")]
    Abe812Allegra,
    #[serde(rename = "ABe_416_1")]
    Abe416Allegra,
    #[serde(rename = "ABe_416_2")]
    Abe416Capricorn,
}

impl LocomotiveCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            LocomotiveCategory::Ge44I => "Ge 4/4 I",
            LocomotiveCategory::Ge44II => "Ge 4/4 II",
            LocomotiveCategory::Ge44III => "Ge 4/4 III",
            LocomotiveCategory::Gem44 => "Gem 4/4 «Zweikraftlok»",
            LocomotiveCategory::Abe812Allegra => "ABe 8/12 «ZTZ Allegra»",
            LocomotiveCategory::Abe416Allegra => "ABe 4/16 «STZ Allegra»",
            LocomotiveCategory::Abe416Capricorn => "ABe 4/16 «Capricorn»",
        }
    }
}

/// Derive the class from a running number. Unknown blocks return None.
pub fn category_from_number(number: u32) -> Option<LocomotiveCategory> {
    match number {
        601..=610 => Some(LocomotiveCategory::Ge44I),
        611..=633 => Some(LocomotiveCategory::Ge44II),
        641..=652 => Some(LocomotiveCategory::Ge44III),
        801..=802 => Some(LocomotiveCategory::Gem44),
        3501..=3515 => Some(LocomotiveCategory::Abe812Allegra),
        3101..=3105 => Some(LocomotiveCategory::Abe416Allegra),
        3111..=3172 => Some(LocomotiveCategory::Abe416Capricorn),
        _ => None,
    }
}

/// Advertising livery carried by an individual unit, where one is known.
pub fn livery_variant(number: u32) -> Option<&'static str> {
    let variant = match number {
        // Ge 4/4 II
        611 => "GRÜN & CHROM",
        612 => "Elektropartner",
        614 | 615 | 617 | 620 | 621 | 624 | 625 | 627 | 629 | 632 => "Rot",
        618 => "RhB groß",
        622 => "Hakone",
        623 => "Glacier Express",
        626 => "Alpine Classic - Pullman",
        630 => "Ihre Werbung",
        631 => "Südostschweiz",
        633 => "RTR",

        // Ge 4/4 III
        641 => "COOP",
        642 | 643 | 647 | 650 | 651 => "Rot",
        644 => "Weltrekord",
        645 => "RTR",
        646 => "BüGa",
        648 => "Watson",
        649 => "Skimarathon",
        652 => "Hockey Club Davos",

        // ABe 8/12 «Allegra»
        3514 => "Ahnenzug",

        // ABe 4/16 «Capricorn»
        3133 => "Champagner",

        _ => return None,
    };
    Some(variant)
}

/// A physical locomotive as coupled into a specific train working.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Locomotive {
    pub number: u32,
    pub category: Option<LocomotiveCategory>,
    /// Human-readable class name, e.g. "Ge 4/4 III"
    pub category_name: Option<&'static str>,
    /// Advertising livery of this unit, if it carries one
    pub variant: Option<&'static str>,
    /// Position within the consist, front to back
    pub position: u32,
    /// Towed dead in the consist rather than working
    pub is_towed: bool,
}
