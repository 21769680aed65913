//! Neuvox - OpenAI 兼容的德语语音合成服务
//!
//! 架构:
//! - Domain: voice/, speech/
//! - Application: commands, queries, ports
//! - Infrastructure: http, adapters

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use neuvox::application::{ModelDescriptor, TtsEnginePort};
use neuvox::config::{load_config_from_path, print_config, AppConfig, TtsEngineKind};
use neuvox::infrastructure::adapters::{
    FakeTtsClient, FfmpegExporter, FfmpegExporterConfig, FileReferenceLoader, HttpTtsClient,
    HttpTtsClientConfig, VoiceDirectory,
};
use neuvox::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 可选：第一个参数为配置文件路径
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    // 加载配置（优先级：旧版环境变量 > 环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Neuvox - OpenAI compatible TTS server");
    print_config(&config);

    // 加载音色注册表，失败直接退出，不监听端口
    let directory = VoiceDirectory::with_manifest(&config.voices.dir, &config.voices.manifest);
    let registry = directory
        .load_registry()
        .with_context(|| format!("Failed to load voices from {}", config.voices.dir.display()))?;

    // 创建 TTS 引擎
    let tts_engine: Arc<dyn TtsEnginePort> = match config.tts.engine {
        TtsEngineKind::Http => {
            let tts_config =
                HttpTtsClientConfig::new(&config.tts.url).with_timeout(config.tts.timeout_secs);
            Arc::new(HttpTtsClient::new(tts_config)?)
        }
        TtsEngineKind::Fake => {
            tracing::warn!("Using fake TTS engine, output is a test tone");
            Arc::new(FakeTtsClient::with_defaults())
        }
    };

    // 创建音频导出器
    let exporter = Arc::new(FfmpegExporter::new(FfmpegExporterConfig {
        ffmpeg_path: config.export.ffmpeg_path.clone(),
        mp3_quality: config.export.mp3_quality,
        opus_bitrate: config.export.opus_bitrate,
    }));

    let model = ModelDescriptor {
        backbone_repo: config.model.backbone_repo.clone(),
        codec_repo: config.model.codec_repo.clone(),
        backbone_device: config.model.backbone_device.clone(),
        codec_device: config.model.codec_device.clone(),
    };

    let state = AppState::new(
        Arc::new(registry),
        Arc::new(FileReferenceLoader::new()),
        tts_engine,
        exporter,
        model,
    );

    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于配置中的级别
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},neuvox={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
