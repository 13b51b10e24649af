//! BMFont descriptor model and parsers.
//!
//! Both the XML form (`<font><info .../>...</font>`) and the line-oriented text
//! form (`info face="x" size=8 ...`) are accepted. Parsing is best effort:
//! every attribute is optional and falls back to 0 / false / empty, and a
//! malformed attribute never aborts the surrounding document.
use std::{collections::HashMap, fs, path::Path};

use bitflags::bitflags;
use log::{debug, warn};

use crate::error::{FontError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub up: i32,
    pub right: i32,
    pub down: i32,
    pub left: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    pub horizontal: i32,
    pub vertical: i32,
}

/// Face metadata from the `info` block. Informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info {
    pub face: String,
    pub size: i32,
    pub bold: bool,
    pub italic: bool,
    pub charset: String,
    pub unicode: bool,
    /// Horizontal stretch in percent.
    pub stretch_h: i32,
    pub smooth: bool,
    pub aa: bool,
    pub padding: Padding,
    pub spacing: Spacing,
    pub outline: i32,
}

/// What a texture channel of the atlas pages holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelRole {
    #[default]
    Glyph,
    Outline,
    GlyphAndOutline,
    Zero,
    One,
    /// Raw value outside 0..=4, kept as found.
    Other(i32),
}

impl From<i32> for ChannelRole {
    fn from(value: i32) -> Self {
        match value {
            0 => ChannelRole::Glyph,
            1 => ChannelRole::Outline,
            2 => ChannelRole::GlyphAndOutline,
            3 => ChannelRole::Zero,
            4 => ChannelRole::One,
            other => ChannelRole::Other(other),
        }
    }
}

/// Shared layout metrics from the `common` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Common {
    pub line_height: i32,
    pub base: i32,
    pub scale_w: i32,
    pub scale_h: i32,
    pub pages: i32,
    pub packed: bool,
    pub alpha_chnl: ChannelRole,
    pub red_chnl: ChannelRole,
    pub green_chnl: ChannelRole,
    pub blue_chnl: ChannelRole,
}

/// Reference to one atlas page image, relative to the descriptor's directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    pub id: i32,
    pub file: String,
}

bitflags! {
    /// Texture channels a glyph is stored in (`chnl` attribute).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u32 {
        const BLUE = 1 << 0;
        const GREEN = 1 << 1;
        const RED = 1 << 2;
        const ALPHA = 1 << 3;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    /// Unicode codepoint.
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub xoffset: i32,
    pub yoffset: i32,
    pub xadvance: i32,
    /// Index into the font's page list.
    pub page: i32,
    pub chnl: i32,
}

impl Glyph {
    pub fn channels(&self) -> ChannelMask {
        ChannelMask::from_bits_retain(self.chnl as u32)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BmFont {
    pub info: Info,
    pub common: Common,
    pub pages: Vec<Page>,
    pub glyphs: HashMap<u32, Glyph>,
}

impl BmFont {
    /// Parse a descriptor, detecting the XML form by its leading `<`.
    ///
    /// Fails only when an XML document is not well formed.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim_start().starts_with('<') {
            Self::parse_xml(text)
        } else {
            Ok(Self::parse_text(text))
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Like [`BmFont::load`], but a missing or broken file yields an empty font.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(font) => font,
            Err(err) => {
                warn!("bmfont: {}: {err}; using empty font", path.display());
                Self::default()
            }
        }
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&(ch as u32))
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&(ch as u32))
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn parse_xml(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| FontError::Parse(format!("bmfont xml: {e}")))?;
        let mut font = BmFont::default();
        let root = doc.root_element();
        if !root.has_tag_name("font") {
            debug!("bmfont: root element <{}> is not <font>", root.tag_name().name());
            return Ok(font);
        }
        let child = |name: &str| root.children().find(|n| n.has_tag_name(name));
        if let Some(info) = child("info") {
            font.info = Info::from_attrs(&Attrs::from_xml(info));
        }
        if let Some(common) = child("common") {
            font.common = Common::from_attrs(&Attrs::from_xml(common));
        }
        if let Some(pages) = child("pages") {
            for page in pages.children().filter(|n| n.has_tag_name("page")) {
                font.pages.push(Page::from_attrs(&Attrs::from_xml(page)));
            }
        }
        if let Some(chars) = child("chars") {
            for ch in chars.children().filter(|n| n.has_tag_name("char")) {
                font.insert_glyph(Glyph::from_attrs(&Attrs::from_xml(ch)));
            }
        }
        Ok(font)
    }

    fn parse_text(text: &str) -> Self {
        let mut font = BmFont::default();
        for line in text.lines() {
            let line = line.trim();
            let (tag, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let attrs = Attrs::from_text(rest);
            match tag {
                "info" => font.info = Info::from_attrs(&attrs),
                "common" => font.common = Common::from_attrs(&attrs),
                "page" => font.pages.push(Page::from_attrs(&attrs)),
                "char" => font.insert_glyph(Glyph::from_attrs(&attrs)),
                // chars/kernings/kerning and blank lines carry nothing we use
                _ => {}
            }
        }
        font
    }

    fn insert_glyph(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.id, glyph);
    }
}

impl Info {
    fn from_attrs(a: &Attrs<'_>) -> Self {
        let padding = a.list("padding");
        let spacing = a.list("spacing");
        let at = |list: &[i32], i: usize| list.get(i).copied().unwrap_or(0);
        Self {
            face: a.string("face"),
            size: a.int("size"),
            bold: a.flag("bold"),
            italic: a.flag("italic"),
            charset: a.string("charset"),
            unicode: a.flag("unicode"),
            stretch_h: a.int("stretchH"),
            smooth: a.flag("smooth"),
            aa: a.flag("aa"),
            padding: Padding {
                up: at(&padding, 0),
                right: at(&padding, 1),
                down: at(&padding, 2),
                left: at(&padding, 3),
            },
            spacing: Spacing {
                horizontal: at(&spacing, 0),
                vertical: at(&spacing, 1),
            },
            outline: a.int("outline"),
        }
    }
}

impl Common {
    fn from_attrs(a: &Attrs<'_>) -> Self {
        Self {
            line_height: a.int("lineHeight"),
            base: a.int("base"),
            scale_w: a.int("scaleW"),
            scale_h: a.int("scaleH"),
            pages: a.int("pages"),
            packed: a.flag("packed"),
            alpha_chnl: a.int("alphaChnl").into(),
            red_chnl: a.int("redChnl").into(),
            green_chnl: a.int("greenChnl").into(),
            blue_chnl: a.int("blueChnl").into(),
        }
    }
}

impl Page {
    fn from_attrs(a: &Attrs<'_>) -> Self {
        Self {
            id: a.int("id"),
            file: a.string("file"),
        }
    }
}

impl Glyph {
    fn from_attrs(a: &Attrs<'_>) -> Self {
        Self {
            id: a.int("id") as u32,
            x: a.int("x"),
            y: a.int("y"),
            width: a.int("width"),
            height: a.int("height"),
            xoffset: a.int("xoffset"),
            yoffset: a.int("yoffset"),
            xadvance: a.int("xadvance"),
            page: a.int("page"),
            chnl: a.int("chnl"),
        }
    }
}

/// Attribute list of one element or line, looked up by name.
struct Attrs<'a>(Vec<(&'a str, &'a str)>);

impl<'a> Attrs<'a> {
    fn from_xml(node: roxmltree::Node<'a, '_>) -> Self {
        Attrs(node.attributes().map(|a| (a.name(), a.value())).collect())
    }

    /// Tokenize `key=value key="quoted value" ...`. No escape sequences.
    fn from_text(mut rest: &'a str) -> Self {
        let mut attrs = Vec::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            let Some(eq) = rest.find('=') else {
                break;
            };
            let key = rest[..eq].trim();
            let after = &rest[eq + 1..];
            let (value, next) = if let Some(quoted) = after.strip_prefix('"') {
                match quoted.find('"') {
                    Some(end) => (&quoted[..end], &quoted[end + 1..]),
                    None => (quoted, ""),
                }
            } else {
                let end = after.find(char::is_whitespace).unwrap_or(after.len());
                (&after[..end], &after[end..])
            };
            // a bare word before the key (`foo key=1`) belongs to nobody
            let key = key.rsplit(char::is_whitespace).next().unwrap_or(key);
            attrs.push((key, value));
            rest = next;
        }
        Attrs(attrs)
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    fn string(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    fn int(&self, name: &str) -> i32 {
        self.get(name).map(parse_int).unwrap_or(0)
    }

    fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(v) if v.trim().eq_ignore_ascii_case("true") => true,
            Some(v) => parse_int(v) != 0,
            None => false,
        }
    }

    fn list(&self, name: &str) -> Vec<i32> {
        match self.get(name) {
            Some(v) if !v.trim().is_empty() => v.split(',').map(parse_int).collect(),
            _ => Vec::new(),
        }
    }
}

/// Leading signed decimal integer of `s`; 0 when there is none.
fn parse_int(s: &str) -> i32 {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().unwrap_or(0)
}
