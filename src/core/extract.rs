//! 请求提取器

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::CoreError;

/// 先反序列化再执行 `Validate`，任何一步失败都返回 400
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// 解析路径中的产品 ID
///
/// 非整数返回 400；负数不可能对应任何产品，返回 `None`。
pub fn parse_id(raw: &str) -> Result<Option<u64>, CoreError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::BadRequest(format!("Invalid product id: {}", raw)))?;
    Ok(u64::try_from(id).ok())
}

/// 查询场景下的宽松解析，任何无法对应产品的输入都返回 `None`
pub fn lookup_id(raw: &str) -> Option<u64> {
    parse_id(raw).ok().flatten()
}
