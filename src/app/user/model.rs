//! 用户数据模型

use serde::Deserialize;
use validator::Validate;

pub type UserId = u64;

/// 用户记录，不通过 HTTP 对外暴露
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsertUser {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
