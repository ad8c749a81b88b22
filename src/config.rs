use crate::error::{BarcodeError, Result};
use plu_barcode_common::CanvasLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// メニューのカテゴリ（表示名とカタログファイル一覧）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub files: Vec<String>,
}

impl Category {
    fn new(name: &str, files: &[&str]) -> Self {
        Self {
            name: name.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// バーコード画像の取得元
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// HTTP描画サービス
    #[default]
    Remote,
    /// ローカルでCode128を生成（オフライン）
    Local,
}

/// バーコード描画サービスと画像加工の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub backend: RenderBackend,
    pub endpoint: String,
    pub symbology: String,
    pub translate_esc: bool,
    pub scale: f32,
    pub padding: u32,
    pub timeout_seconds: u64,
    pub jpeg_quality: u8,
    /// ローカル生成時のバーの高さ(px)
    pub local_height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let layout = CanvasLayout::default();
        Self {
            backend: RenderBackend::Remote,
            endpoint: "https://barcode.tec-it.com/barcode.ashx".into(),
            symbology: "Code128".into(),
            translate_esc: true,
            scale: layout.scale,
            padding: layout.padding,
            timeout_seconds: 30,
            jpeg_quality: 90,
            local_height: 80,
        }
    }
}

impl RenderSettings {
    pub fn layout(&self) -> CanvasLayout {
        CanvasLayout::new(self.scale, self.padding)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カタログJSONの置き場所
    pub plu_dir: PathBuf,
    /// 出力フォルダのルート
    pub output_dir: PathBuf,
    /// バーコード検索に使うカタログ（先頭が優先）
    pub data_files: Vec<PathBuf>,
    pub monitoring_file: PathBuf,
    pub categories: Vec<Category>,
    pub render: RenderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 設定ファイルを読み込む（なければデフォルト）
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                BarcodeError::Config(format!("{}: {}", config_path.display(), e))
            })?;
            Ok(config)
        } else if path.is_some() {
            Err(BarcodeError::Config(format!(
                "設定ファイルが見つかりません: {}",
                config_path.display()
            )))
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BarcodeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plu-barcode").join("config.json"))
    }

    /// 相対パスは `plu_dir` 基準で解決
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.plu_dir.join(path)
        }
    }

    /// 優先順に並んだ検索用カタログ
    pub fn catalog_priority(&self) -> Vec<PathBuf> {
        self.data_files.iter().map(|f| self.resolve_path(f)).collect()
    }

    pub fn monitoring_path(&self) -> PathBuf {
        self.resolve_path(&self.monitoring_file)
    }

    /// 出力フォルダ（`output_dir/<name>`）
    pub fn output_folder(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    fn default_config() -> Self {
        let root = PathBuf::from("/storage/emulated/0/galinx");
        Self {
            plu_dir: root.clone(),
            output_dir: root,
            data_files: vec!["file1.json".into(), "file2.json".into()],
            monitoring_file: "monitoring.json".into(),
            categories: default_categories(),
            render: RenderSettings::default(),
        }
    }
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new("PPT", &["ppt1.json", "ppt2.json"]),
        Category::new("DND", &["dnd1.json", "dnd2.json", "dnd3.json", "dnd4.json"]),
        Category::new("HNM", &["hnm1.json", "hnm2.json"]),
        Category::new("DIA", &["dia1.json", "dia2.json", "dia3.json"]),
        Category::new(
            "MBF",
            &["mbf1.json", "mbf2.json", "mbf3.json", "mbf4.json", "mbf5.json", "mbf6.json"],
        ),
        Category::new(
            "PCE",
            &[
                "pce1.json", "pce2.json", "pce3.json", "pce4.json",
                "pce5.json", "pce6.json", "pce7.json", "pce8.json",
            ],
        ),
        Category::new("STA", &["sta1.json"]),
        Category::new("TOY", &["toy1.json"]),
        Category::new("CNA", &["cna1.json"]),
        Category::new("IFD", &["ifd1.json", "ifd2.json", "ifd3.json", "ifd4.json"]),
        Category::new(
            "BFD",
            &["bfd1.json", "bfd2.json", "bfd3.json", "bfd4.json", "bfd5.json", "bfd6.json"],
        ),
        Category::new("CON", &["con1.json", "con2.json"]),
        Category::new("SLK", &["slk1.json"]),
        Category::new("SHB", &["shb1.json"]),
        Category::new(
            "SNB",
            &[
                "snb1.json", "snb2.json", "snb3.json", "snb4.json", "snb5.json",
                "snb6.json", "snb7.json", "snb8.json", "snb9.json", "snb10.json",
            ],
        ),
        Category::new("BRE", &["bre1.json", "bre2.json"]),
        Category::new("BEV", &["bev1.json", "bev2.json"]),
        Category::new("CLB", &["clb1.json"]),
        Category::new("YCG", &["ycg1.json"]),
        Category::new("RBAT", &["rbat1.json"]),
        Category::new("RG35", &["rg351.json"]),
        Category::new("MBG", &["mbg1.json"]),
        Category::new("BWSH", &["bwsh1.json"]),
    ]
}
