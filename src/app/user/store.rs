//! 用户存储抽象

use super::model::{InsertUser, User, UserId};
use crate::core::error::StoreResult;

pub trait UserStore: Send + Sync {
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// 按用户名精确查找
    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// 用户名重复时返回 `StoreError::DuplicateUsername`
    fn create_user(&self, input: InsertUser) -> StoreResult<User>;
}
