use serde::Serialize;

/// Sentinel selector value meaning "do not restrict by area".
pub const ALL_AREAS: &str = "ALL";

/// Named columns of the two input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Category,
    Attribute,
    Area,
    Metric,
    Theme,
    Item,
}

impl Field {
    /// Header of the column as it appears in the input files.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Category => "CATEGORY",
            Self::Attribute => "ATTRIBUTE",
            Self::Area => "AREA",
            Self::Metric => "METRIC",
            Self::Theme => "TEMA",
            Self::Item => "ITEM_AJUST",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "SDG",
            Self::Attribute => "Attribute",
            Self::Area => "Area",
            Self::Metric => "Metric",
            Self::Theme => "SDG",
            Self::Item => "Item",
        }
    }
}

/// True when a selector value is the "all areas" sentinel ("ALL" or "All").
pub fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL_AREAS)
}

/// Row types that expose their named columns to the filter and table code.
pub trait Record {
    fn field(&self, field: Field) -> Option<&str>;
}
