//! 髒標記追蹤

use std::collections::BTreeSet;

/// 需要重算的資產（以車隊編號追蹤）
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_fleets: BTreeSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記資產為髒
    pub fn mark_dirty(&mut self, fleet_number: &str) {
        self.dirty_fleets.insert(fleet_number.to_string());
    }

    /// 批量標記
    pub fn mark_all<'a>(&mut self, fleet_numbers: impl IntoIterator<Item = &'a str>) {
        for fleet_number in fleet_numbers {
            self.mark_dirty(fleet_number);
        }
    }

    /// 檢查資產是否為髒
    pub fn is_dirty(&self, fleet_number: &str) -> bool {
        self.dirty_fleets.contains(fleet_number)
    }

    /// 移除單一資產的標記
    pub fn forget(&mut self, fleet_number: &str) {
        self.dirty_fleets.remove(fleet_number);
    }

    /// 取出所有髒資產並清除標記（按車隊編號排序）
    pub fn take_dirty(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dirty_fleets).into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_fleets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirty_fleets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_dirty_sorted_and_clears() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty("EX-002");
        tracker.mark_all(["EX-001", "EX-002"]);

        assert_eq!(tracker.len(), 2);
        assert!(tracker.is_dirty("EX-001"));

        assert_eq!(tracker.take_dirty(), vec!["EX-001", "EX-002"]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_forget() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty("DZ-01");
        tracker.forget("DZ-01");
        assert!(!tracker.is_dirty("DZ-01"));
    }
}
