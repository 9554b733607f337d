use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelter-intake")]
#[command(about = "保護動物入所データの前処理・分類ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データファイルを前処理して出力
    Process {
        /// 入力ファイルまたはフォルダ（省略時: 既定ファイル、なければ対話選択）
        input: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力と同じ場所の output/）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/json/all)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 毛色・発見場所の分類を並列実行
        #[arg(long)]
        parallel: bool,

        /// 日付に変換できない値を欠損値にする（既定は列ごと変換しない）
        #[arg(long)]
        coerce_dates: bool,
    },

    /// 毛色テキストを分類
    Color {
        /// 毛色テキスト（例: "검정/고등어무늬"）
        #[arg(required = true)]
        text: String,
    },

    /// 発見場所テキストを分類
    Place {
        /// 発見場所テキスト
        #[arg(required = true)]
        text: String,
    },

    /// 保護所住所を分解
    Address {
        /// 住所テキスト
        #[arg(required = true)]
        text: String,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
