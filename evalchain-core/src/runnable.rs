use async_trait::async_trait;

use crate::EvalchainError;

#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: Send + 'static>: Send + Sync {
    async fn invoke(&self, input: Input) -> Result<Output, EvalchainError>;
}
