//! Receipt document node tree
//!
//! A receipt document is an ordered sequence of nodes. Two kinds are
//! containers (`alignment`, `line`) and nest arbitrary children; the rest
//! are leaves. The wire format is a tagged union discriminated by `$type`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One node of a receipt document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum ReceiptNode {
    /// Container that aligns its children on the paper
    #[serde(rename = "alignment")]
    Alignment {
        alignment: Alignment,
        children: Vec<ReceiptNode>,
    },

    /// Container that renders its children as a single line
    #[serde(rename = "line")]
    Line {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<LineFormat>,
        children: Vec<ReceiptNode>,
    },

    /// A run of text, optionally formatted
    #[serde(rename = "text")]
    Text {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<TextFormat>,
    },

    /// Paper cut
    #[serde(rename = "cut")]
    Cut,

    /// Line feed
    #[serde(rename = "newline")]
    Newline,

    /// QR code carrying an arbitrary string payload
    #[serde(rename = "qr-code")]
    QrCode { value: String },
}

impl ReceiptNode {
    /// Whether this node kind nests children
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Alignment { .. } | Self::Line { .. })
    }

    /// Children of a container node, empty slice for leaves
    pub fn children(&self) -> &[ReceiptNode] {
        match self {
            Self::Alignment { children, .. } | Self::Line { children, .. } => children,
            _ => &[],
        }
    }
}

/// The six node kinds, as dispatched on the `$type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Alignment,
    Line,
    Text,
    Cut,
    Newline,
    QrCode,
}

impl NodeKind {
    /// All accepted `$type` literals, in documentation order
    pub const ALL: [&'static str; 6] = ["alignment", "line", "text", "cut", "newline", "qr-code"];

    /// Parse a `$type` literal
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "alignment" => Some(Self::Alignment),
            "line" => Some(Self::Line),
            "text" => Some(Self::Text),
            "cut" => Some(Self::Cut),
            "newline" => Some(Self::Newline),
            "qr-code" => Some(Self::QrCode),
            _ => None,
        }
    }
}

/// Horizontal alignment of an `alignment` container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Built-in printer fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    A,
    B,
    C,
}

/// Formatting for a `line` container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// Formatting for a `text` run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFormat {
    /// Relative font size, must be positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
}

/// Underline mode: `false`, `true`, or the literal `2` for double underline
///
/// The wire format is a historical quirk of the receipt schema - a boolean
/// that grew a third state. Serialized back exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    Off,
    On,
    Double,
}

impl Serialize for Underline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::On => serializer.serialize_bool(true),
            Self::Double => serializer.serialize_u64(2),
        }
    }
}

impl<'de> Deserialize<'de> for Underline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UnderlineVisitor;

        impl<'de> Visitor<'de> for UnderlineVisitor {
            type Value = Underline;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or the number 2")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(if v { Underline::On } else { Underline::Off })
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v == 2 {
                    Ok(Underline::Double)
                } else {
                    Err(E::custom("underline must be a boolean or 2"))
                }
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v == 2 {
                    Ok(Underline::Double)
                } else {
                    Err(E::custom("underline must be a boolean or 2"))
                }
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v == 2.0 {
                    Ok(Underline::Double)
                } else {
                    Err(E::custom("underline must be a boolean or 2"))
                }
            }
        }

        deserializer.deserialize_any(UnderlineVisitor)
    }
}
