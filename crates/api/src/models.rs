use gallery_models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Category name, `All Categories` or absent for everything
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountsResponse {
    pub total: usize,
    pub counts: BTreeMap<Category, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<Vec<usize>>,
}
