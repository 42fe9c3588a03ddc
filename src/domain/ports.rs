use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// 一個具名、無狀態的計算：輸入記錄 -> 結果記錄
pub trait Calculation: Send + Sync {
    type Input: DeserializeOwned;
    type Output: Serialize;

    fn name(&self) -> &'static str;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output>;
}
