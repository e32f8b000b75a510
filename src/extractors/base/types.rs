// Base Extractor Types
//
// Node kinds, resolved values, reference kinds and the reference record
// produced by the extractor.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::error::{ExtractError, Result};

/// Kind tag carried by every node of an asset tree
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Grouping node without a value of its own
    Container,
    String,
    Integer,
    Float,
    Vector,
    Bitmap,
    Audio,
}

impl NodeKind {
    /// Bitmap and audio nodes point into the binary asset region of the file
    pub fn is_binary_asset(&self) -> bool {
        matches!(self, NodeKind::Bitmap | NodeKind::Audio)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Container => write!(f, "container"),
            NodeKind::String => write!(f, "string"),
            NodeKind::Integer => write!(f, "integer"),
            NodeKind::Float => write!(f, "float"),
            NodeKind::Vector => write!(f, "vector"),
            NodeKind::Bitmap => write!(f, "bitmap"),
            NodeKind::Audio => write!(f, "audio"),
        }
    }
}

/// Handle to a bitmap or audio payload stored outside the node table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AssetRef {
    pub kind: NodeKind,
    pub id: u32,
}

/// Typed value obtained by dereferencing a node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResolvedValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Vector { x: i32, y: i32 },
    Asset(AssetRef),
}

impl ResolvedValue {
    /// The node kind this value naturally belongs to
    pub fn kind(&self) -> NodeKind {
        match self {
            ResolvedValue::Text(_) => NodeKind::String,
            ResolvedValue::Integer(_) => NodeKind::Integer,
            ResolvedValue::Float(_) => NodeKind::Float,
            ResolvedValue::Vector { .. } => NodeKind::Vector,
            ResolvedValue::Asset(asset) => asset.kind,
        }
    }

    /// Strict view: only text values are text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text conversion table
    ///
    /// | value | result |
    /// |---|---|
    /// | text | the text itself |
    /// | integer | decimal representation |
    /// | finite float | shortest round-trip decimal |
    /// | non-finite float | `ConversionFailure` |
    /// | vector, asset | no value (`Ok(None)`) |
    pub fn to_text(&self) -> Result<Option<Cow<'_, str>>> {
        match self {
            ResolvedValue::Text(text) => Ok(Some(Cow::Borrowed(text))),
            ResolvedValue::Integer(value) => Ok(Some(Cow::Owned(value.to_string()))),
            ResolvedValue::Float(value) if value.is_finite() => {
                Ok(Some(Cow::Owned(value.to_string())))
            }
            ResolvedValue::Float(value) => Err(ExtractError::ConversionFailure {
                value: value.to_string(),
            }),
            ResolvedValue::Vector { .. } | ResolvedValue::Asset(_) => Ok(None),
        }
    }

    /// Owning variant of [`ResolvedValue::to_text`]
    pub fn into_text(self) -> Result<Option<String>> {
        match self {
            ResolvedValue::Text(text) => Ok(Some(text)),
            other => Ok(other.to_text()?.map(Cow::into_owned)),
        }
    }
}

/// Category of in-game entity (or formatting directive) a markup code points to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Map,
    Mob,
    Npc,
    Item,
    ItemAlt,
    ItemPicture,
    ItemPictureAlt,
    SkillPicture,
    SkillName,
    ItemCountInInventory,
    ListOpen,
    ListClose,
    PlayerName,
    ProgressBar,
    Unknown,
    ImageLocation,
    ImageLocationAlt,
    Bold,
    NotBold,
    BlueColor,
    PurpleColor,
    GreenColor,
    BlackColor,
    RedColor,
}

impl ReferenceKind {
    /// Every kind, in declaration order
    pub const ALL: [ReferenceKind; 24] = [
        ReferenceKind::Map,
        ReferenceKind::Mob,
        ReferenceKind::Npc,
        ReferenceKind::Item,
        ReferenceKind::ItemAlt,
        ReferenceKind::ItemPicture,
        ReferenceKind::ItemPictureAlt,
        ReferenceKind::SkillPicture,
        ReferenceKind::SkillName,
        ReferenceKind::ItemCountInInventory,
        ReferenceKind::ListOpen,
        ReferenceKind::ListClose,
        ReferenceKind::PlayerName,
        ReferenceKind::ProgressBar,
        ReferenceKind::Unknown,
        ReferenceKind::ImageLocation,
        ReferenceKind::ImageLocationAlt,
        ReferenceKind::Bold,
        ReferenceKind::NotBold,
        ReferenceKind::BlueColor,
        ReferenceKind::PurpleColor,
        ReferenceKind::GreenColor,
        ReferenceKind::BlackColor,
        ReferenceKind::RedColor,
    ];

    /// Convert from string representation; unrecognised names map to `Unknown`
    pub fn from_string(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .unwrap_or(ReferenceKind::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Map => "map",
            ReferenceKind::Mob => "mob",
            ReferenceKind::Npc => "npc",
            ReferenceKind::Item => "item",
            ReferenceKind::ItemAlt => "item_alt",
            ReferenceKind::ItemPicture => "item_picture",
            ReferenceKind::ItemPictureAlt => "item_picture_alt",
            ReferenceKind::SkillPicture => "skill_picture",
            ReferenceKind::SkillName => "skill_name",
            ReferenceKind::ItemCountInInventory => "item_count_in_inventory",
            ReferenceKind::ListOpen => "list_open",
            ReferenceKind::ListClose => "list_close",
            ReferenceKind::PlayerName => "player_name",
            ReferenceKind::ProgressBar => "progress_bar",
            ReferenceKind::Unknown => "unknown",
            ReferenceKind::ImageLocation => "image_location",
            ReferenceKind::ImageLocationAlt => "image_location_alt",
            ReferenceKind::Bold => "bold",
            ReferenceKind::NotBold => "not_bold",
            ReferenceKind::BlueColor => "blue_color",
            ReferenceKind::PurpleColor => "purple_color",
            ReferenceKind::GreenColor => "green_color",
            ReferenceKind::BlackColor => "black_color",
            ReferenceKind::RedColor => "red_color",
        }
    }

    /// Archive holding the entity a code of this kind points to.
    ///
    /// Formatting and layout codes point at nothing.
    pub fn source_archive(&self) -> Option<&'static str> {
        match self {
            ReferenceKind::Map => Some("Map.nx"),
            ReferenceKind::Mob => Some("Mob.nx"),
            ReferenceKind::Npc => Some("Npc.nx"),
            ReferenceKind::Item
            | ReferenceKind::ItemAlt
            | ReferenceKind::ItemPicture
            | ReferenceKind::ItemPictureAlt
            | ReferenceKind::ItemCountInInventory => Some("Item.nx"),
            ReferenceKind::SkillPicture | ReferenceKind::SkillName => Some("Skill.nx"),
            ReferenceKind::PlayerName => Some("Character.nx"),
            ReferenceKind::ImageLocation | ReferenceKind::ImageLocationAlt => Some("UI.nx"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One markup code found in a leaf's text
///
/// The record borrows node handles from the tree; it never owns nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord<N> {
    parent: N,
    referencing: N,
    referenced_id: String,
    raw_text: String,
    kind: ReferenceKind,
}

impl<N: Copy> ReferenceRecord<N> {
    pub(crate) fn new(
        parent: N,
        referencing: N,
        referenced_id: String,
        raw_text: String,
        kind: ReferenceKind,
    ) -> Self {
        Self {
            parent,
            referencing,
            referenced_id,
            raw_text,
            kind,
        }
    }

    /// Entry node the leaf was found under
    pub fn parent(&self) -> N {
        self.parent
    }

    /// Leaf whose text contains the code
    pub fn referencing(&self) -> N {
        self.referencing
    }

    /// Digits of the code; empty for kinds without an id
    pub fn referenced_id(&self) -> &str {
        &self.referenced_id
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_kind_string_round_trip() {
        for kind in ReferenceKind::ALL {
            assert_eq!(ReferenceKind::from_string(&kind.to_string()), kind);
        }
        assert_eq!(ReferenceKind::from_string("quest"), ReferenceKind::Unknown);
    }

    #[test]
    fn test_reference_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&ReferenceKind::ItemCountInInventory).unwrap();
        assert_eq!(json, "\"item_count_in_inventory\"");
    }

    #[test]
    fn test_source_archive() {
        assert_eq!(ReferenceKind::Npc.source_archive(), Some("Npc.nx"));
        assert_eq!(ReferenceKind::ItemPictureAlt.source_archive(), Some("Item.nx"));
        assert_eq!(ReferenceKind::SkillName.source_archive(), Some("Skill.nx"));
        assert_eq!(ReferenceKind::Bold.source_archive(), None);
        assert_eq!(ReferenceKind::ListOpen.source_archive(), None);
    }

    #[test]
    fn test_text_conversion_table() {
        let text = ResolvedValue::Text("hello".into());
        assert_eq!(text.to_text().unwrap().as_deref(), Some("hello"));

        let int = ResolvedValue::Integer(-42);
        assert_eq!(int.to_text().unwrap().as_deref(), Some("-42"));

        let float = ResolvedValue::Float(1.5);
        assert_eq!(float.to_text().unwrap().as_deref(), Some("1.5"));

        let vector = ResolvedValue::Vector { x: 1, y: 2 };
        assert_eq!(vector.to_text().unwrap(), None);

        let asset = ResolvedValue::Asset(AssetRef {
            kind: NodeKind::Bitmap,
            id: 7,
        });
        assert_eq!(asset.to_text().unwrap(), None);
        assert_eq!(asset.kind(), NodeKind::Bitmap);
    }

    #[test]
    fn test_non_finite_float_fails_conversion() {
        let err = ResolvedValue::Float(f64::NAN).into_text().unwrap_err();
        assert!(matches!(err, ExtractError::ConversionFailure { .. }));
    }

    #[test]
    fn test_as_text_is_strict() {
        assert_eq!(ResolvedValue::Integer(5).as_text(), None);
        assert_eq!(ResolvedValue::Text("5".into()).as_text(), Some("5"));
    }

    #[test]
    fn test_resolved_value_serde_is_adjacently_tagged() {
        let json = serde_json::to_value(ResolvedValue::Integer(9)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "integer", "value": 9}));
    }
}
