use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// A grid coordinate, row-major: `row` counts down from the top edge,
/// `col` counts right from the left edge.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// Grid dimensions and mine count for constructing or reconfiguring a
/// [`Minefield`](crate::Minefield).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            mines: 10,
        }
    }
}

impl FieldConfig {
    /// Check that the grid has at least one cell and that at least one
    /// cell stays mine-free.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 || self.mines >= self.width * self.height {
            return Err(FieldError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                mines: self.mines,
            });
        }
        Ok(())
    }
}

/// What a hosting shell is allowed to see of one cell. Hidden and
/// flagged cells never leak whether they hold a mine; `Mine` only
/// appears once the cell has been revealed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum CellView {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FieldConfig::default();
        assert_eq!((config.width, config.height, config.mines), (10, 10, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_dimensions_and_full_grids() {
        for config in [
            FieldConfig {
                width: 0,
                height: 5,
                mines: 0,
            },
            FieldConfig {
                width: 5,
                height: 0,
                mines: 0,
            },
            FieldConfig {
                width: 3,
                height: 3,
                mines: 9,
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(FieldError::InvalidConfiguration { .. })
            ));
        }

        // One mine-free cell is enough.
        assert!(
            FieldConfig {
                width: 3,
                height: 3,
                mines: 8,
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn cell_view_wire_shape() {
        let json = serde_json::to_string(&CellView::Revealed { adjacent: 3 }).unwrap();
        assert_eq!(json, r#"{"state":"revealed","adjacent":3}"#);
        assert_eq!(
            serde_json::from_str::<CellView>(r#"{"state":"flagged"}"#).unwrap(),
            CellView::Flagged
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: FieldConfig = serde_json::from_str(r#"{"mines":40}"#).unwrap();
        assert_eq!((config.width, config.height, config.mines), (10, 10, 40));
    }
}
