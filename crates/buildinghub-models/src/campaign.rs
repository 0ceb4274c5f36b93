//! Voluntary contribution campaigns.

use serde::Serialize;

/// Whether a campaign is still collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CampaignStatus {
    Active,
    Completed,
}

impl CampaignStatus {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            CampaignStatus::Active => "Đang quyên góp",
            CampaignStatus::Completed => "Đã kết thúc",
        }
    }
}

/// A fundraising campaign. Amounts are in VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Campaign {
    pub id: u32,
    pub title: &'static str,
    pub total_raised: u64,
    pub goal: u64,
    pub participants: u32,
    pub status: CampaignStatus,
}

impl Campaign {
    /// Progress towards the goal as a percentage, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        if self.goal == 0 {
            return 100;
        }
        let pct = self.total_raised.saturating_mul(100) / self.goal;
        pct.min(100) as u8
    }
}

/// Campaigns listed on the contributions page.
pub static CAMPAIGNS: &[Campaign] = &[
    Campaign {
        id: 1,
        title: "Ủng hộ miền Trung lũ lụt",
        total_raised: 50_000_000,
        goal: 100_000_000,
        participants: 120,
        status: CampaignStatus::Active,
    },
    Campaign {
        id: 2,
        title: "Quỹ Trung Thu cho các cháu",
        total_raised: 15_000_000,
        goal: 20_000_000,
        participants: 45,
        status: CampaignStatus::Active,
    },
    Campaign {
        id: 3,
        title: "Quỹ khuyến học cư dân 2024",
        total_raised: 30_000_000,
        goal: 30_000_000,
        participants: 80,
        status: CampaignStatus::Completed,
    },
];
