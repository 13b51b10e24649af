use std::path::Path;

use log::{debug, warn};

use crate::{
    bmfont::{BmFont, Glyph},
    image_io, DrawTarget,
};

/// A parsed descriptor together with its realized page textures.
///
/// `pages[i]` belongs to `descriptor.pages[i]`; a page that failed to load
/// stays `None` so the remaining pages keep their index. Textures live as
/// long as the font does.
pub struct Font<T> {
    descriptor: BmFont,
    pages: Vec<Option<T>>,
}

impl<T> Font<T> {
    pub fn empty() -> Self {
        Self::from_parts(BmFont::default(), Vec::new())
    }

    pub fn from_parts(descriptor: BmFont, pages: Vec<Option<T>>) -> Self {
        Self { descriptor, pages }
    }

    /// Load a descriptor and realize its pages on `target`.
    ///
    /// Never fails: a broken descriptor gives an empty font, a broken page
    /// leaves a hole that renders nothing.
    pub fn load<D>(target: &mut D, path: &Path) -> Self
    where
        D: DrawTarget<Texture = T>,
    {
        let descriptor = BmFont::load_or_empty(path);
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let pages = descriptor
            .pages
            .iter()
            .map(|page| {
                let page_path = dir.join(&page.file);
                let texture = image_io::load_page(&page_path)
                    .and_then(|image| target.create_texture(image));
                match texture {
                    Ok(texture) => Some(texture),
                    Err(err) => {
                        warn!("font: page {}: {err}", page_path.display());
                        None
                    }
                }
            })
            .collect();
        debug!(
            "font: loaded {} ({} glyphs, {} pages)",
            path.display(),
            descriptor.glyph_count(),
            descriptor.pages.len()
        );
        Self { descriptor, pages }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.info.face
    }

    pub fn descriptor(&self) -> &BmFont {
        &self.descriptor
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.descriptor.glyph(ch)
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.descriptor.has_char(ch)
    }

    /// Realized texture for page `index`, if it exists and loaded.
    pub fn page(&self, index: i32) -> Option<&T> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.pages.get(i))
            .and_then(Option::as_ref)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl<T> Default for Font<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lookup_rejects_negative_and_missing() {
        let font: Font<u8> = Font::from_parts(BmFont::default(), vec![Some(1), None]);
        assert_eq!(font.page(0), Some(&1));
        assert_eq!(font.page(1), None);
        assert_eq!(font.page(2), None);
        assert_eq!(font.page(-1), None);
    }
}
