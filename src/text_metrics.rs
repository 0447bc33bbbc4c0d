use crate::scene::FontWeight;
use fontdb::{Database, Family, ID, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use ttf_parser::Face;

/// Average advance, as a fraction of the font size, used when no face resolves.
pub const FALLBACK_ADVANCE: f32 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

pub fn measure_text_width(
    text: &str,
    font_size: f32,
    font_family: &str,
    weight: FontWeight,
) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family, weight)
}

/// Width of `text`, falling back to an average glyph advance when the family
/// cannot be loaded. The fallback is logged once per family.
pub fn text_width(text: &str, font_size: f32, font_family: &str, weight: FontWeight) -> f32 {
    if let Some(width) = measure_text_width(text, font_size, font_family, weight) {
        return width;
    }
    if let Ok(mut guard) = TEXT_MEASURER.lock()
        && guard.warned.insert(normalize_family_key(font_family))
    {
        log::warn!("font family `{font_family}` not found, estimating text widths");
    }
    estimate_width(text, font_size)
}

pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().filter(|ch| *ch != '\n').count() as f32 * font_size * FALLBACK_ADVANCE
}

/// True when at least one entry of a CSS-style family list resolves to a face.
pub fn font_available(font_family: &str) -> bool {
    let Ok(mut guard) = TEXT_MEASURER.lock() else {
        return false;
    };
    guard.query(font_family, FontWeight::Normal).is_some()
}

/// Makes fonts under `dirs` visible to measurement. Idempotent per directory.
pub fn load_font_dirs(dirs: &[PathBuf]) {
    let Ok(mut guard) = TEXT_MEASURER.lock() else {
        return;
    };
    for dir in dirs {
        if guard.font_dirs.insert(dir.clone()) {
            log::debug!("loading fonts from {}", dir.display());
            guard.db.load_fonts_dir(dir);
            guard.cache.clear();
        }
    }
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    font_dirs: HashSet<PathBuf>,
    cache: HashMap<(String, FontWeight), Option<FontFace>>,
    warned: HashSet<String>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            font_dirs: HashSet::new(),
            cache: HashMap::new(),
            warned: HashSet::new(),
        }
    }

    fn measure(
        &mut self,
        text: &str,
        font_size: f32,
        font_family: &str,
        weight: FontWeight,
    ) -> Option<f32> {
        let key = (normalize_family_key(font_family), weight);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(font_family, weight);
            self.cache.insert(key.clone(), face);
        }
        let face = self.cache.get(&key).and_then(|face| face.as_ref())?;
        let normalized = text.replace('\t', "    ");
        Some(face.measure_width(&normalized, font_size))
    }

    fn query(&mut self, font_family: &str, weight: FontWeight) -> Option<ID> {
        let (names, order) = parse_family_list(font_family);
        let families: Vec<Family<'_>> = order
            .iter()
            .map(|token| match token {
                FamilyToken::Generic(family) => *family,
                FamilyToken::Name(idx) => Family::Name(names[*idx].as_str()),
            })
            .collect();

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: match weight {
                FontWeight::Normal => Weight::NORMAL,
                FontWeight::Bold => Weight::BOLD,
            },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        self.db.query(&query)
    }

    fn load_face(&mut self, font_family: &str, weight: FontWeight) -> Option<FontFace> {
        let id = self.query(font_family, weight)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            loaded = FontFace::parse(data, index);
        });
        loaded
    }
}

#[derive(Clone, Copy)]
enum FamilyToken {
    Generic(Family<'static>),
    Name(usize),
}

fn parse_family_list(font_family: &str) -> (Vec<String>, Vec<FamilyToken>) {
    let mut names: Vec<String> = Vec::new();
    let mut order: Vec<FamilyToken> = Vec::new();
    for part in font_family.split(',') {
        let raw = part.trim().trim_matches('"').trim_matches('\'');
        if raw.is_empty() {
            continue;
        }
        match raw.to_ascii_lowercase().as_str() {
            "serif" => order.push(FamilyToken::Generic(Family::Serif)),
            "sans-serif" | "system-ui" | "ui-sans-serif" => {
                order.push(FamilyToken::Generic(Family::SansSerif))
            }
            "monospace" | "ui-monospace" => order.push(FamilyToken::Generic(Family::Monospace)),
            _ => {
                order.push(FamilyToken::Name(names.len()));
                names.push(raw.to_string());
            }
        }
    }
    if order.is_empty() {
        order.push(FamilyToken::Generic(Family::SansSerif));
    }
    (names, order)
}

/// Horizontal advances pulled out of a parsed face. ASCII is kept in a flat
/// table, everything else in a map filled at load time.
struct FontFace {
    units_per_em: u16,
    ascii_advances: [u16; 128],
    advances: HashMap<char, u16>,
}

impl FontFace {
    fn parse(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        let mut advances = HashMap::new();
        // Covers the bullets, arrows and multiplication signs used by the figures.
        for ch in ['•', '→', '×', '✓', '✗', '–', '—'] {
            if let Some(glyph) = face.glyph_index(ch) {
                advances.insert(ch, face.glyph_hor_advance(glyph).unwrap_or(0));
            }
        }
        Some(Self {
            units_per_em: face.units_per_em().max(1),
            ascii_advances,
            advances,
        })
    }

    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * FALLBACK_ADVANCE;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                self.ascii_advances[ch as usize]
            } else {
                self.advances.get(&ch).copied().unwrap_or(0)
            };
            if advance == 0 {
                width += fallback;
            } else {
                width += advance as f32 * scale;
            }
        }
        width.max(0.0)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
