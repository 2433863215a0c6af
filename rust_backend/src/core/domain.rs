//! Domain models for task blocks and mission rows.
//!
//! A [`BlockDefinition`] is an immutable catalog entry. Adding it to a mission
//! produces a [`MissionBlock`], whose duration is a [`BlockTime`] cell that can be
//! edited independently of the catalog default.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Column holding the block name.
pub const COLUMN_NAME: &str = "Nom";
/// Column holding the block duration in minutes.
pub const COLUMN_TIME: &str = "Temps";
/// Column holding the block category.
pub const COLUMN_CATEGORY: &str = "Catégorie";

/// Columns every imported file must provide, in export order.
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_NAME, COLUMN_TIME, COLUMN_CATEGORY];

/// An entry of the block catalog.
///
/// # Examples
///
/// ```
/// use sting_rust::core::domain::BlockDefinition;
///
/// let def = BlockDefinition::new("Portail", 5, "contractualisation");
/// assert_eq!(def.default_duration, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    #[serde(rename = "Nom")]
    pub name: String,
    #[serde(rename = "Temps")]
    pub default_duration: u32,
    #[serde(rename = "Catégorie")]
    pub category: String,
}

impl BlockDefinition {
    pub fn new(name: &str, default_duration: u32, category: &str) -> Self {
        Self {
            name: name.to_string(),
            default_duration,
            category: category.to_string(),
        }
    }
}

/// Stored value of a block's `Temps` cell.
///
/// Blocks added from the catalog or edited through the table always hold
/// [`BlockTime::Minutes`]. Imported rows keep whatever the file contained as
/// [`BlockTime::Pending`] until the table is sanitized, which happens before
/// every total or aggregate computation.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockTime {
    /// A clean duration in minutes.
    Minutes(u32),
    /// A raw imported value that has not been coerced yet.
    Pending(Value),
}

impl BlockTime {
    /// Build a cell from a decoded JSON value.
    ///
    /// Positive integers are stored clean; everything else stays pending.
    pub fn from_cell(value: Value) -> Self {
        match value.as_u64().filter(|m| *m > 0) {
            Some(m) => match u32::try_from(m) {
                Ok(m) => BlockTime::Minutes(m),
                Err(_) => BlockTime::Pending(value),
            },
            None => BlockTime::Pending(value),
        }
    }

    /// Build a cell from a CSV field.
    pub fn from_text(text: &str) -> Self {
        match text.trim().parse::<u32>() {
            Ok(m) if m > 0 => BlockTime::Minutes(m),
            _ => BlockTime::Pending(Value::String(text.to_string())),
        }
    }

    /// Coerced duration in minutes.
    ///
    /// Invalid, missing and non-positive values coerce to 0. Fractional values
    /// are truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sting_rust::core::domain::BlockTime;
    ///
    /// assert_eq!(BlockTime::from("abc").minutes(), 0);
    /// assert_eq!(BlockTime::from(-5i64).minutes(), 0);
    /// assert_eq!(BlockTime::from("12.7").minutes(), 12);
    /// assert_eq!(BlockTime::from(30u32).minutes(), 30);
    /// ```
    pub fn minutes(&self) -> u32 {
        match self {
            BlockTime::Minutes(m) => *m,
            BlockTime::Pending(value) => coerce_value(value),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, BlockTime::Pending(_))
    }

    /// The clean form of this cell.
    pub fn sanitized(&self) -> BlockTime {
        BlockTime::Minutes(self.minutes())
    }

    /// JSON projection used by the exporter.
    pub fn to_json(&self) -> Value {
        match self {
            BlockTime::Minutes(m) => Value::from(*m),
            BlockTime::Pending(value) => value.clone(),
        }
    }

    /// CSV projection used by the exporter.
    pub fn to_csv_field(&self) -> String {
        match self {
            BlockTime::Minutes(m) => m.to_string(),
            BlockTime::Pending(value) => text_cell(value),
        }
    }
}

fn coerce_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                clamp_i64(i)
            } else if n.as_u64().is_some() {
                // Only reachable above i64::MAX.
                u32::MAX
            } else {
                n.as_f64().map(clamp_f64).unwrap_or(0)
            }
        }
        Value::String(s) => coerce_text(s),
        Value::Bool(b) => u32::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

fn coerce_text(text: &str) -> u32 {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        clamp_i64(i)
    } else if let Ok(f) = text.parse::<f64>() {
        clamp_f64(f)
    } else {
        0
    }
}

fn clamp_i64(i: i64) -> u32 {
    if i <= 0 {
        0
    } else {
        u32::try_from(i).unwrap_or(u32::MAX)
    }
}

fn clamp_f64(f: f64) -> u32 {
    if !f.is_finite() || f < 1.0 {
        0
    } else if f >= u32::MAX as f64 {
        u32::MAX
    } else {
        f.trunc() as u32
    }
}

/// Render an imported cell as text. `null` becomes the empty string.
pub(crate) fn text_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<u32> for BlockTime {
    fn from(minutes: u32) -> Self {
        BlockTime::Minutes(minutes)
    }
}

impl From<i64> for BlockTime {
    fn from(minutes: i64) -> Self {
        BlockTime::from_cell(Value::from(minutes))
    }
}

impl From<i32> for BlockTime {
    fn from(minutes: i32) -> Self {
        BlockTime::from(i64::from(minutes))
    }
}

impl From<f64> for BlockTime {
    fn from(minutes: f64) -> Self {
        BlockTime::Pending(Value::from(minutes))
    }
}

impl From<&str> for BlockTime {
    fn from(text: &str) -> Self {
        BlockTime::from_text(text)
    }
}

impl From<String> for BlockTime {
    fn from(text: String) -> Self {
        BlockTime::from_text(&text)
    }
}

impl From<Value> for BlockTime {
    fn from(value: Value) -> Self {
        BlockTime::from_cell(value)
    }
}

impl Serialize for BlockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockTime::Minutes(m) => serializer.serialize_u32(*m),
            BlockTime::Pending(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BlockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(BlockTime::from_cell)
    }
}

/// A block selected into the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionBlock {
    #[serde(rename = "Nom")]
    pub name: String,
    #[serde(rename = "Temps")]
    pub duration: BlockTime,
    #[serde(rename = "Catégorie")]
    pub category: String,
}

impl MissionBlock {
    pub fn new(name: &str, duration: impl Into<BlockTime>, category: &str) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.into(),
            category: category.to_string(),
        }
    }

    /// Copy a catalog entry, starting from its default duration.
    pub fn from_definition(definition: &BlockDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            duration: BlockTime::Minutes(definition.default_duration),
            category: definition.category.clone(),
        }
    }

    pub fn minutes(&self) -> u32 {
        self.duration.minutes()
    }
}

/// Summed duration of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub minutes: u64,
}
