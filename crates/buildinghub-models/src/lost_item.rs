//! Lost-item reports followed by the authority role.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Handling status of a lost-item report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LostItemStatus {
    Handled,
    InProgress,
    NotFound,
}

impl LostItemStatus {
    /// All statuses in display order.
    pub const ALL: [LostItemStatus; 3] =
        [LostItemStatus::Handled, LostItemStatus::InProgress, LostItemStatus::NotFound];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            LostItemStatus::Handled => "ĐÃ XỬ LÝ",
            LostItemStatus::InProgress => "ĐANG XỬ LÝ",
            LostItemStatus::NotFound => "KHÔNG TÌM THẤY",
        }
    }
}

/// A lost-item announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LostItemReport {
    pub id: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub status: LostItemStatus,
    /// Report creation time, seconds since the Unix epoch.
    pub created_at_unix: i64,
    /// Day the item went missing, `dd/mm/yyyy`.
    pub event_date: &'static str,
}

impl LostItemReport {
    /// Report creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created_at_unix, 0).unwrap_or_default()
    }
}

/// Count reports per status, in [`LostItemStatus::ALL`] order.
pub fn count_by_status(reports: &[LostItemReport]) -> [(LostItemStatus, usize); 3] {
    LostItemStatus::ALL.map(|status| {
        let count = reports.iter().filter(|r| r.status == status).count();
        (status, count)
    })
}

/// Known lost-item reports.
pub static LOST_ITEM_REPORTS: &[LostItemReport] = &[
    LostItemReport {
        id: 1,
        title: "Mất ví da đen",
        message: "Mất ví da màu đen tại khu vực sảnh tầng 1 vào chiều thứ 6.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764928800,
        event_date: "04/12/2025",
    },
    LostItemReport {
        id: 2,
        title: "Thất lạc chìa khóa",
        message: "Chùm chìa khóa có móc hình cá heo bị rơi gần khu vực thang máy.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764862200,
        event_date: "04/12/2025",
    },
    LostItemReport {
        id: 3,
        title: "Mất điện thoại Samsung",
        message: "Điện thoại Samsung S21 màu tím bị mất ở khu vực phòng gym.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764762300,
        event_date: "03/12/2025",
    },
    LostItemReport {
        id: 4,
        title: "Thẻ cư dân bị rơi",
        message: "Mất thẻ cư dân A101.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764576000,
        event_date: "01/12/2025",
    },
    LostItemReport {
        id: 5,
        title: "Đồng hồ thông minh",
        message: "Mất đồng hồ Fitbit màu xanh trong bãi giữ xe.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764345600,
        event_date: "28/11/2025",
    },
    LostItemReport {
        id: 6,
        title: "Tai nghe AirPods",
        message: "Mất hộp tai nghe AirPods Pro tại khu vực hồ bơi.",
        status: LostItemStatus::Handled,
        created_at_unix: 1764081000,
        event_date: "25/11/2025",
    },
    LostItemReport {
        id: 7,
        title: "Cặp sách học sinh",
        message: "Mất cặp sách màu hồng, bên trong có sách vở lớp 3.",
        status: LostItemStatus::Handled,
        created_at_unix: 1763802000,
        event_date: "22/11/2025",
    },
    LostItemReport {
        id: 8,
        title: "Mất thẻ ngân hàng",
        message: "Mất thẻ Vietcombank tại sảnh tòa nhà B.",
        status: LostItemStatus::Handled,
        created_at_unix: 1763661600,
        event_date: "20/11/2025",
    },
    LostItemReport {
        id: 9,
        title: "Mất ô tô đồ chơi",
        message: "Ô tô điều khiển từ xa màu đỏ bị mất ở khu vực sân chơi trẻ em.",
        status: LostItemStatus::InProgress,
        created_at_unix: 1765566000,
        event_date: "12/12/2025",
    },
    LostItemReport {
        id: 10,
        title: "Mất kính cận",
        message: "Kính cận gọng màu bạc, bị rơi trên đường đi bộ tầng 3.",
        status: LostItemStatus::InProgress,
        created_at_unix: 1765474800,
        event_date: "11/12/2025",
    },
    LostItemReport {
        id: 11,
        title: "Ba lô laptop",
        message: "Mất ba lô đựng laptop màu xám, có logo công ty X.",
        status: LostItemStatus::InProgress,
        created_at_unix: 1765272600,
        event_date: "09/12/2025",
    },
    LostItemReport {
        id: 12,
        title: "Nhẫn vàng trắng",
        message: "Mất nhẫn cưới vàng trắng, không có khắc tên.",
        status: LostItemStatus::NotFound,
        created_at_unix: 1763200800,
        event_date: "15/11/2025",
    },
    LostItemReport {
        id: 13,
        title: "Giấy tờ tùy thân",
        message: "Mất toàn bộ giấy tờ cá nhân bao gồm CCCD và Bằng lái xe.",
        status: LostItemStatus::NotFound,
        created_at_unix: 1762776000,
        event_date: "10/11/2025",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status(LOST_ITEM_REPORTS);
        assert_eq!(
            counts,
            [
                (LostItemStatus::Handled, 8),
                (LostItemStatus::InProgress, 3),
                (LostItemStatus::NotFound, 2),
            ]
        );
    }

    #[test]
    fn test_created_at_conversion() {
        let first = &LOST_ITEM_REPORTS[0];
        assert_eq!(first.created_at(), Utc.with_ymd_and_hms(2025, 12, 5, 10, 0, 0).unwrap());
    }
}
