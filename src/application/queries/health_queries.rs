//! Health Queries

/// 健康检查查询
#[derive(Debug, Clone)]
pub struct GetHealth;

/// 推理模型描述（仅用于展示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub backbone_repo: String,
    pub codec_repo: String,
    pub backbone_device: String,
    pub codec_device: String,
}
