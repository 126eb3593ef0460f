//! Page/block data model
//!
//! The unit of output is a [`Page`]: one per source page, holding the ordered
//! text blocks recognized on it. Digital extraction produces exactly one
//! block per page; OCR produces one block per recognized line.

use serde::{Deserialize, Serialize, Serializer};

/// A unit of recognized text with metadata.
///
/// For digitally-extracted text the confidence is fixed at 100 and no
/// bounding box exists (`bbox` serializes as `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Recognized text
    pub text: String,
    /// Language tag (e.g. "en")
    pub lang: String,
    /// Confidence score, 0-100. Whole values serialize as integers
    /// (`100`, not `100.0`), matching the artifact shape of digital blocks.
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f32,
    /// Bounding box as `[x, y, width, height]` in image pixels, if known
    pub bbox: Option<[f32; 4]>,
}

fn serialize_confidence<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 {
        serializer.serialize_u32(*value as u32)
    } else {
        serializer.serialize_f32(*value)
    }
}

impl Block {
    /// A block carrying a full page of digitally-extracted text.
    pub fn digital(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: "en".to_string(),
            confidence: 100.0,
            bbox: None,
        }
    }
}

/// Per-page container of blocks within a processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number, 1-based and contiguous in document order
    pub page: u32,
    /// Source path: the document itself for digital pages, the rasterized
    /// image for OCR'd pages
    pub file: String,
    /// Ordered blocks on this page
    pub blocks: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digital_block_has_fixed_confidence_and_no_bbox() {
        let block = Block::digital("Hello");
        assert_eq!(block.text, "Hello");
        assert_eq!(block.lang, "en");
        assert_eq!(block.confidence, 100.0);
        assert!(block.bbox.is_none());
    }

    #[test]
    fn absent_bbox_serializes_as_null() {
        let block = Block::digital("Hello");
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("bbox").unwrap().is_null());
    }

    #[test]
    fn whole_confidence_serializes_as_integer() {
        let json = serde_json::to_string(&Block::digital("Hello")).unwrap();
        assert!(json.contains("\"confidence\":100,"), "got: {}", json);
    }

    #[test]
    fn fractional_confidence_keeps_its_decimals() {
        let block = Block {
            text: "word".to_string(),
            lang: "en".to_string(),
            confidence: 87.5,
            bbox: Some([1.0, 2.0, 3.0, 4.0]),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"confidence\":87.5"), "got: {}", json);
    }
}
