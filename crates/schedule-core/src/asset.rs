//! 資產（設備）模型

use serde::{Deserialize, Serialize};

use crate::UsageRate;

/// 資產
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// 車隊編號
    pub fleet_number: String,

    /// 資產類別（ADT、Excavator、Dozer 等）
    pub category: Option<String>,

    /// 型號
    pub model: Option<String>,

    /// 每日使用時數估計（未設定時由排程計算器決定）
    pub daily_usage: Option<UsageRate>,
}

impl Asset {
    /// 創建新的資產
    pub fn new(fleet_number: String) -> Self {
        Self {
            fleet_number,
            category: None,
            model: None,
            daily_usage: None,
        }
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// 建構器模式：設置型號
    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    /// 建構器模式：設置每日使用時數
    pub fn with_daily_usage(mut self, rate: UsageRate) -> Self {
        self.daily_usage = Some(rate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_asset_builder() {
        let asset = Asset::new("ADT-014".to_string())
            .with_category("ADT".to_string())
            .with_model("Bell B40E".to_string())
            .with_daily_usage(UsageRate::from_hours(30));

        assert_eq!(asset.fleet_number, "ADT-014");
        assert_eq!(asset.category.as_deref(), Some("ADT"));
        assert_eq!(asset.model.as_deref(), Some("Bell B40E"));
        assert_eq!(asset.daily_usage.map(|r| r.hours()), Some(Decimal::from(24)));
    }
}
