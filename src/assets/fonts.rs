use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{WalliError, WalliResult};

/// Font bytes selected for a family list, ready for shaping and glyph rendering.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    /// Family name of the selected face.
    pub family: String,
    /// Face index inside `data` (non-zero for font collections).
    pub index: u32,
    /// Raw font file bytes.
    pub data: Arc<Vec<u8>>,
    pub(crate) key: u64,
}

/// Database of available font faces, queried with CSS-style family lists.
pub struct FontLibrary {
    db: fontdb::Database,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Library with no faces loaded.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Library populated from the platform's installed fonts.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self { db }
    }

    /// Add every font file found under `dir`.
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        let before = self.db.len();
        self.db.load_fonts_dir(dir.as_ref());
        tracing::debug!(
            dir = %dir.as_ref().display(),
            added = self.db.len() - before,
            "loaded font directory"
        );
    }

    /// Add a font from raw bytes.
    pub fn load_font_data(&mut self, bytes: Vec<u8>) {
        self.db.load_font_data(bytes);
    }

    /// Number of faces known to the library.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Distinct family names, sorted.
    pub fn family_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Pick a face for `family_list` (e.g. `"'Open Sans', Arial, sans-serif"`).
    ///
    /// Names are tried in order; generic families map to the database's generic defaults. When
    /// nothing matches, the first face in the library is used so text still renders. Fails only
    /// when the library is empty.
    pub fn resolve(&self, family_list: &str) -> WalliResult<ResolvedFont> {
        let names = parse_family_list(family_list);
        let mut id = None;
        for name in &names {
            let family = generic_family(name).unwrap_or(fontdb::Family::Name(name));
            let families = [family];
            let query = fontdb::Query {
                families: &families,
                ..fontdb::Query::default()
            };
            if let Some(found) = self.db.query(&query) {
                id = Some(found);
                break;
            }
        }

        let id = match id {
            Some(id) => id,
            None => {
                let first = self.db.faces().next().map(|f| f.id).ok_or_else(|| {
                    WalliError::render(format!(
                        "no font available for family list \"{family_list}\""
                    ))
                })?;
                tracing::debug!(family_list, "no family matched; using first available face");
                first
            }
        };

        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_default();
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| WalliError::render(format!("font data for \"{family}\" unreadable")))?;

        let mut key_input = data.clone();
        key_input.extend_from_slice(&index.to_le_bytes());
        let key = xxhash_rust::xxh3::xxh3_64(&key_input);

        Ok(ResolvedFont {
            family,
            index,
            data: Arc::new(data),
            key,
        })
    }
}

/// Split a CSS `font-family` value into unquoted, trimmed names.
pub(crate) fn parse_family_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

fn generic_family(name: &str) -> Option<fontdb::Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(fontdb::Family::Serif),
        "sans-serif" => Some(fontdb::Family::SansSerif),
        "monospace" => Some(fontdb::Family::Monospace),
        "cursive" => Some(fontdb::Family::Cursive),
        "fantasy" => Some(fontdb::Family::Fantasy),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts from resolved fonts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Register `font` with the shaping context once; returns the family name to select it by.
    fn register(&mut self, font: &ResolvedFont) -> WalliResult<String> {
        if let Some(name) = self.registered.get(&font.key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| WalliError::render("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WalliError::render("registered font family has no name"))?
            .to_string();

        self.registered.insert(font.key, family_name.clone());
        Ok(family_name)
    }

    /// Shape `text` as a single unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WalliResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WalliError::render("text size must be finite and > 0"));
        }
        let family_name = self.register(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
