//! バーコード画像のレイアウト計算
//!
//! 取得した画像を縮小し、白い余白付きキャンバスの中央に配置するための寸法を求める。

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: f32 = 0.75;
pub const DEFAULT_PADDING: u32 = 20;

/// 縮小率と余白
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasLayout {
    pub scale: f32,
    /// 上下左右それぞれの余白（px）
    pub padding: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            padding: DEFAULT_PADDING,
        }
    }
}

impl CanvasLayout {
    pub fn new(scale: f32, padding: u32) -> Self {
        Self { scale, padding }
    }

    /// 縮小後のサイズ（四捨五入、最小1px）
    pub fn scaled_size(&self, width: u32, height: u32) -> (u32, u32) {
        (scale_dim(width, self.scale), scale_dim(height, self.scale))
    }

    /// キャンバスサイズ = 縮小後サイズ + 余白×2
    pub fn canvas_size(&self, width: u32, height: u32) -> (u32, u32) {
        let (w, h) = self.scaled_size(width, height);
        (w + self.padding * 2, h + self.padding * 2)
    }

    /// キャンバス上の貼り付け位置（中央寄せ）
    pub fn offset(&self, width: u32, height: u32) -> (u32, u32) {
        let (w, h) = self.scaled_size(width, height);
        let (cw, ch) = self.canvas_size(width, height);
        ((cw - w) / 2, (ch - h) / 2)
    }
}

fn scale_dim(value: u32, scale: f32) -> u32 {
    let scaled = (f64::from(value) * f64::from(scale)).round();
    (scaled as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.scale, 0.75);
        assert_eq!(layout.padding, 20);
    }

    #[test]
    fn test_canvas_size_exact() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.scaled_size(400, 200), (300, 150));
        assert_eq!(layout.canvas_size(400, 200), (340, 190));
    }

    #[test]
    fn test_canvas_size_rounds() {
        let layout = CanvasLayout::default();
        // 101*0.75 = 75.75, 33*0.75 = 24.75
        assert_eq!(layout.scaled_size(101, 33), (76, 25));
        assert_eq!(layout.canvas_size(101, 33), (116, 65));
    }

    #[test]
    fn test_tiny_image_keeps_one_pixel() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.scaled_size(1, 1), (1, 1));
        assert_eq!(layout.canvas_size(1, 1), (41, 41));
    }

    #[test]
    fn test_offset_is_padding() {
        let layout = CanvasLayout::new(0.5, 10);
        assert_eq!(layout.offset(80, 40), (10, 10));
    }
}
