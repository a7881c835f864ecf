//! rsamp 命令行：改写文章嵌入、查看扫描设置

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rsamp::{
    AmpConfig, CatalogTranslator, ConfigManager, ScanSettings, UrlScanningContext,
    WordPressEmbedHandler,
};

#[derive(Debug, Parser)]
#[command(name = "rsamp", version, about = "AMP 嵌入改写与扫描设置工具")]
struct Cli {
    /// JSON 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 从标准输入读取 oEmbed HTML，输出 AMP 标记
    Rewrite {
        /// 嵌入源 URL
        #[arg(long)]
        url: String,
        /// 覆盖默认高度
        #[arg(long)]
        height: Option<u32>,
        /// JSON 翻译目录
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// 输出解析后的扫描设置
    ScanConfig {
        /// 每类 URL 数量，-1 表示不限
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i64>,
        /// 条件白名单，可重复
        #[arg(long = "conditional")]
        conditionals: Vec<String>,
        /// 包含不支持 AMP 的 URL
        #[arg(long)]
        include_unsupported: bool,
        /// JSON 设置文件，命令行参数优先
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "rsamp=debug" } else { "rsamp=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AmpConfig> {
    let config = match &cli.config {
        Some(path) => AmpConfig::from_file(path)
            .with_context(|| format!("读取配置失败：{}", path.display()))?,
        None => ConfigManager::get_default(),
    };
    Ok(AmpConfig {
        verbose: config.verbose || cli.verbose,
        ..config
    })
}

fn run_rewrite(config: AmpConfig, url: &str, height: Option<u32>, catalog: Option<&PathBuf>) -> Result<()> {
    let config = match height {
        Some(height) => ConfigManager::custom()
            .embed_width(config.embed_width)
            .embed_height(height)
            .text_domain(config.text_domain)
            .verbose(config.verbose)
            .build(),
        None => config,
    };

    let mut handler = WordPressEmbedHandler::new(&config);
    if let Some(path) = catalog {
        let translator = CatalogTranslator::from_file(path)
            .with_context(|| format!("读取翻译目录失败：{}", path.display()))?;
        handler = handler.with_translator(Arc::new(translator));
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("读取标准输入失败")?;

    println!("{}", handler.filter_embed_oembed_html(&input, url));
    Ok(())
}

fn run_scan_config(
    limit: Option<i64>,
    conditionals: Vec<String>,
    include_unsupported: bool,
    settings: Option<&PathBuf>,
) -> Result<()> {
    let mut resolved = match settings {
        Some(path) => ScanSettings::from_file(path)
            .with_context(|| format!("读取扫描设置失败：{}", path.display()))?,
        None => ScanSettings::default(),
    };
    if let Some(limit) = limit {
        resolved.limit_per_type = limit;
    }
    if !conditionals.is_empty() {
        resolved.include_conditionals = conditionals;
    }
    resolved.include_unsupported |= include_unsupported;

    let context = UrlScanningContext::from(resolved);
    let effective = ScanSettings {
        limit_per_type: context.get_limit_per_type(),
        include_conditionals: context.get_include_conditionals().to_vec(),
        include_unsupported: context.get_include_unsupported(),
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.verbose);

    match cli.command {
        Command::Rewrite { url, height, catalog } => run_rewrite(config, &url, height, catalog.as_ref()),
        Command::ScanConfig {
            limit,
            conditionals,
            include_unsupported,
            settings,
        } => run_scan_config(limit, conditionals, include_unsupported, settings.as_ref()),
    }
}
