//! 画像取得・加工のテスト（ネットワークは使わない）

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use plu_barcode::config::{RenderBackend, RenderSettings};
use plu_barcode::error::{BarcodeError, Result};
use plu_barcode::render::{
    compose, decode_image, fetcher_for, BarcodeFetcher, LocalCode128Fetcher, Renderer,
};
use plu_barcode_common::CanvasLayout;
use std::io::Cursor;

/// 固定サイズのPNGを返すスタブ
struct PngFetcher {
    width: u32,
    height: u32,
}

impl BarcodeFetcher for PngFetcher {
    fn fetch(&self, _barcode: &str) -> Result<Vec<u8>> {
        let image = RgbImage::from_pixel(self.width, self.height, Rgb([0, 0, 0]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buf, ImageFormat::Png)
            .expect("png encode");
        Ok(buf.into_inner())
    }
}

struct BytesFetcher(Vec<u8>);

impl BarcodeFetcher for BytesFetcher {
    fn fetch(&self, _barcode: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct FailingFetcher;

impl BarcodeFetcher for FailingFetcher {
    fn fetch(&self, _barcode: &str) -> Result<Vec<u8>> {
        Err(BarcodeError::HttpStatus {
            status: 503,
            url: "https://barcode.example.com".into(),
        })
    }
}

#[test]
fn test_render_canvas_size() {
    for (w, h) in [(400, 200), (101, 33), (250, 97)] {
        let renderer = Renderer::new(Box::new(PngFetcher { width: w, height: h }), CanvasLayout::default());
        let canvas = renderer.render("999000101").unwrap();

        let expected_w = (w as f64 * 0.75).round() as u32 + 40;
        let expected_h = (h as f64 * 0.75).round() as u32 + 40;
        assert_eq!(canvas.dimensions(), (expected_w, expected_h), "source {}x{}", w, h);
    }
}

#[test]
fn test_render_custom_layout() {
    let renderer = Renderer::new(
        Box::new(PngFetcher { width: 100, height: 50 }),
        CanvasLayout::new(0.5, 5),
    );
    assert_eq!(renderer.layout(), CanvasLayout::new(0.5, 5));
    assert_eq!(renderer.render("1").unwrap().dimensions(), (60, 35));
}

#[test]
fn test_render_fetch_error_passes_through() {
    let renderer = Renderer::new(Box::new(FailingFetcher), CanvasLayout::default());
    let err = renderer.render("1").unwrap_err();

    assert!(matches!(err, BarcodeError::HttpStatus { status: 503, .. }));
    assert!(format!("{}", err).contains("503"));
}

#[test]
fn test_render_decode_error() {
    let renderer = Renderer::new(
        Box::new(BytesFetcher(b"<html>not an image</html>".to_vec())),
        CanvasLayout::default(),
    );
    assert!(matches!(renderer.render("1"), Err(BarcodeError::Decode(_))));
    assert!(matches!(decode_image(&[]), Err(BarcodeError::Decode(_))));
}

/// グレースケール画像もRGBに変換される
#[test]
fn test_compose_grayscale_to_rgb() {
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(20, 20, Luma([0])));
    let canvas = compose(&gray, &CanvasLayout::default());

    assert_eq!(canvas.dimensions(), (55, 55));
    assert_eq!(canvas.get_pixel(27, 27), &Rgb([0, 0, 0]));
    assert_eq!(canvas.get_pixel(5, 5), &Rgb([255, 255, 255]));
}

#[test]
fn test_compose_rgba_drops_alpha() {
    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, Rgba([10, 20, 30, 255])));
    let canvas = compose(&rgba, &CanvasLayout::default());

    assert_eq!(canvas.dimensions(), (70, 70));
    assert_eq!(canvas.get_pixel(35, 35), &Rgb([10, 20, 30]));
}

/// 余白部分はすべて白
#[test]
fn test_compose_border_is_white() {
    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 40, Rgb([0, 0, 0])));
    let canvas = compose(&black, &CanvasLayout::default());
    let (w, h) = canvas.dimensions();
    let white = Rgb([255, 255, 255]);

    for x in 0..w {
        for y in (0..20).chain(h - 20..h) {
            assert_eq!(canvas.get_pixel(x, y), &white);
        }
    }
    for y in 0..h {
        for x in (0..20).chain(w - 20..w) {
            assert_eq!(canvas.get_pixel(x, y), &white);
        }
    }
}

/// ローカル生成はネットワークなしでデコード可能なPNGを返す
#[test]
fn test_local_fetcher_output_decodes() {
    let fetcher = LocalCode128Fetcher::new(80);
    for code in ["999000101", "101", "12345678", "AB-12"] {
        let bytes = fetcher.fetch(code).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png, "{}", code);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.height(), 80);
        assert!(decoded.width() > 0);
    }
}

/// 桁数が多いほどバーコードの幅が広がる
#[test]
fn test_local_fetcher_width_grows_with_data() {
    let fetcher = LocalCode128Fetcher::new(40);
    let short = decode_image(&fetcher.fetch("1").unwrap()).unwrap();
    let long = decode_image(&fetcher.fetch("ABCDEFGHIJ").unwrap()).unwrap();
    assert!(long.width() > short.width());
}

#[test]
fn test_local_render_canvas_size() {
    let settings = RenderSettings {
        backend: RenderBackend::Local,
        local_height: 80,
        ..RenderSettings::default()
    };
    let raw = decode_image(&LocalCode128Fetcher::new(80).fetch("999000101").unwrap()).unwrap();

    let renderer = Renderer::new(fetcher_for(&settings).unwrap(), settings.layout());
    let canvas = renderer.render("999000101").unwrap();

    let expected_w = (raw.width() as f64 * 0.75).round() as u32 + 40;
    assert_eq!(canvas.dimensions(), (expected_w, 60 + 40));
    assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 255, 255]));
}

/// Code128で表せない文字は生成エラー
#[test]
fn test_local_fetcher_rejects_unencodable() {
    let fetcher = LocalCode128Fetcher::new(80);
    assert!(matches!(fetcher.fetch("\u{00e9}"), Err(BarcodeError::Encode(_))));
}
