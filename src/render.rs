//! バーコード画像の取得と加工
//!
//! 描画サービス（またはローカル生成）からCode128画像を取得し、
//! RGB化 → 縮小 → 白余白付きキャンバスへ中央配置する。
//! ファイル書き込みは行わない（`output` モジュールが担当）。

use barcoders::generators::image::Image;
use barcoders::sym::code128::Code128;
use crate::config::{RenderBackend, RenderSettings};
use crate::error::{BarcodeError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use plu_barcode_common::CanvasLayout;
use std::time::Duration;

/// バーコード文字列から画像バイト列を取得する
pub trait BarcodeFetcher {
    fn fetch(&self, barcode: &str) -> Result<Vec<u8>>;
}

/// HTTP経由の描画サービス
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
    symbology: String,
    translate_esc: bool,
}

impl HttpFetcher {
    pub fn new(settings: &RenderSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| BarcodeError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            symbology: settings.symbology.clone(),
            translate_esc: settings.translate_esc,
        })
    }

    /// `?data=<barcode>&code=Code128&translate-esc=on`
    pub fn request_url(&self, barcode: &str) -> Result<reqwest::Url> {
        let mut params = vec![("data", barcode), ("code", self.symbology.as_str())];
        if self.translate_esc {
            params.push(("translate-esc", "on"));
        }

        reqwest::Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| BarcodeError::Config(format!("エンドポイントURLが不正: {} ({})", self.endpoint, e)))
    }
}

impl BarcodeFetcher for HttpFetcher {
    fn fetch(&self, barcode: &str) -> Result<Vec<u8>> {
        let url = self.request_url(barcode)?;
        tracing::debug!(%url, "requesting barcode image");

        // bytes() でボディを読み切ってからレスポンスを解放する
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.bytes()?;

        tracing::debug!(bytes = body.len(), "barcode image received");
        Ok(body.to_vec())
    }
}

/// Code128をローカルで生成する（ネットワーク不要）
///
/// 偶数桁の数字はコードセットC、それ以外はコードセットBで符号化する。
/// エスケープシーケンスの変換は行わない。
pub struct LocalCode128Fetcher {
    height: u32,
}

impl LocalCode128Fetcher {
    pub fn new(height: u32) -> Self {
        Self { height: height.max(1) }
    }

    /// コードセット選択文字を先頭に付けたデータ
    pub fn symbol_data(barcode: &str) -> String {
        let numeric = !barcode.is_empty() && barcode.bytes().all(|b| b.is_ascii_digit());
        let set = if numeric && barcode.len() % 2 == 0 { '\u{0106}' } else { '\u{0181}' };
        format!("{}{}", set, barcode)
    }
}

impl BarcodeFetcher for LocalCode128Fetcher {
    fn fetch(&self, barcode: &str) -> Result<Vec<u8>> {
        let symbol = Code128::new(Self::symbol_data(barcode))
            .map_err(|e| BarcodeError::Encode(format!("'{}': {}", barcode, e)))?;
        let encoded = symbol.encode();

        let png = Image::png(self.height)
            .generate(&encoded[..])
            .map_err(|e| BarcodeError::Encode(format!("'{}': {}", barcode, e)))?;

        tracing::debug!(bytes = png.len(), modules = encoded.len(), "barcode generated locally");
        Ok(png)
    }
}

/// 設定のバックエンドに応じた取得元
pub fn fetcher_for(settings: &RenderSettings) -> Result<Box<dyn BarcodeFetcher>> {
    match settings.backend {
        RenderBackend::Remote => Ok(Box::new(HttpFetcher::new(settings)?)),
        RenderBackend::Local => Ok(Box::new(LocalCode128Fetcher::new(settings.local_height))),
    }
}

/// 取得 → デコード → 加工
pub struct Renderer {
    fetcher: Box<dyn BarcodeFetcher>,
    layout: CanvasLayout,
}

impl Renderer {
    pub fn new(fetcher: Box<dyn BarcodeFetcher>, layout: CanvasLayout) -> Self {
        Self { fetcher, layout }
    }

    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    pub fn render(&self, barcode: &str) -> Result<RgbImage> {
        let bytes = self.fetcher.fetch(barcode)?;
        let image = decode_image(&bytes)?;
        Ok(compose(&image, &self.layout))
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| BarcodeError::Decode(e.to_string()))
}

/// RGB化した画像を縮小し、白いキャンバスの中央に貼り付ける
pub fn compose(image: &DynamicImage, layout: &CanvasLayout) -> RgbImage {
    let (width, height) = (image.width(), image.height());
    tracing::debug!(width, height, color = ?image.color(), "composing barcode");

    let rgb = match image {
        DynamicImage::ImageRgb8(buf) => buf.clone(),
        other => other.to_rgb8(),
    };

    let (scaled_w, scaled_h) = layout.scaled_size(width, height);
    let scaled = imageops::resize(&rgb, scaled_w, scaled_h, FilterType::Lanczos3);

    let (canvas_w, canvas_h) = layout.canvas_size(width, height);
    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, Rgb([255, 255, 255]));

    let (x, y) = layout.offset(width, height);
    imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));

    canvas
}
