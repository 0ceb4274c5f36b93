//! Building regulations.
//!
//! Regulations are static informational entries whose `content` is a
//! semi-structured text block (numbered sections with bulleted lines).

use chrono::NaiveDate;
use serde::Serialize;

/// Category of a regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationCategory {
    HouseRules,
    Security,
    Services,
    Finance,
    Maintenance,
    Living,
}

impl RegulationCategory {
    /// All categories in display order.
    pub const ALL: [RegulationCategory; 6] = [
        RegulationCategory::HouseRules,
        RegulationCategory::Security,
        RegulationCategory::Services,
        RegulationCategory::Finance,
        RegulationCategory::Maintenance,
        RegulationCategory::Living,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RegulationCategory::HouseRules => "Nội quy",
            RegulationCategory::Security => "An ninh",
            RegulationCategory::Services => "Dịch vụ",
            RegulationCategory::Finance => "Tài chính",
            RegulationCategory::Maintenance => "Bảo trì",
            RegulationCategory::Living => "Sinh hoạt",
        }
    }

    /// Look up a category by its display label or variant name.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        let compact = needle.replace(['-', '_'], "");
        Self::ALL.into_iter().find(|c| {
            c.label().to_lowercase() == needle || format!("{:?}", c).to_lowercase() == compact
        })
    }
}

/// Importance tier of a regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "Quan trọng",
            Priority::Medium => "Trung bình",
            Priority::Low => "Thông thường",
        }
    }
}

/// A building regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Regulation {
    pub id: u32,
    pub category: RegulationCategory,
    pub title: &'static str,
    pub content: &'static str,
    /// Last update, `dd/mm/yyyy`.
    pub last_updated: &'static str,
    pub priority: Priority,
}

impl Regulation {
    /// Parsed last-update date.
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.last_updated, "%d/%m/%Y").ok()
    }
}

/// The most recent update across a set of regulations.
pub fn latest_update(regulations: &[Regulation]) -> Option<NaiveDate> {
    regulations.iter().filter_map(Regulation::last_updated_date).max()
}

/// The building's regulations.
pub static REGULATIONS: &[Regulation] = &[
    Regulation {
        id: 1,
        title: "Nội quy chung cư",
        category: RegulationCategory::HouseRules,
        content: "
1. Giờ giấc sinh hoạt:
   - Từ 22:00 - 06:00: Giữ yên lặng, không gây tiếng ồn
   - Từ 06:00 - 22:00: Có thể sinh hoạt bình thường nhưng không quá mức

2. Sử dụng thang máy:
   - Ưu tiên người già, trẻ em, phụ nữ có thai
   - Không hút thuốc, ăn uống trong thang máy
   - Giới hạn tải trọng: 8 người hoặc 630kg

3. Khu vực chung:
   - Không để đồ đạc cá nhân ở hành lang, cầu thang
   - Không treo quần áo, đồ khô ở ban công
   - Giữ gìn vệ sinh chung
",
        last_updated: "01/01/2025",
        priority: Priority::High,
    },
    Regulation {
        id: 2,
        title: "Quy định về an ninh",
        category: RegulationCategory::Security,
        content: "
1. Ra vào tòa nhà:
   - Cư dân sử dụng thẻ từ cá nhân
   - Khách mời phải đăng ký tại bảo vệ
   - Giờ đóng cửa: 23:00 - 05:00

2. Camera giám sát:
   - Lắp đặt tại tất cả khu vực chung
   - Dữ liệu lưu trữ 30 ngày
   - Chỉ quản lý tòa nhà được truy cập

3. Báo cáo sự cố:
   - Hotline: 1900-1234 (24/7)
   - Email: security@bluemoon.com
   - Báo cáo ngay khi phát hiện bất thường
",
        last_updated: "15/01/2025",
        priority: Priority::High,
    },
    Regulation {
        id: 3,
        title: "Quy định về dịch vụ",
        category: RegulationCategory::Services,
        content: "
1. Dịch vụ có sẵn:
   - Giặt ủi: Tầng 2, giờ hoạt động 07:00-20:00
   - Gym: Tầng 3, giờ hoạt động 05:00-22:00
   - Hồ bơi: Tầng 4, giờ hoạt động 06:00-21:00
   - Sân chơi trẻ em: Tầng 1, giờ hoạt động 06:00-20:00

2. Đặt dịch vụ:
   - Qua app quản lý tòa nhà
   - Hotline: 1900-5678
   - Thanh toán qua app hoặc tại quầy dịch vụ

3. Quy định sử dụng:
   - Đặt lịch trước ít nhất 2 giờ
   - Hủy dịch vụ trước 1 giờ
   - Tuân thủ quy định an toàn
",
        last_updated: "20/01/2025",
        priority: Priority::Medium,
    },
    Regulation {
        id: 4,
        title: "Quy định về phí dịch vụ",
        category: RegulationCategory::Finance,
        content: "
1. Các loại phí:
   - Phí quản lý: 2,500,000 VNĐ/tháng
   - Phí gửi xe máy: 150,000 VNĐ/tháng
   - Phí gửi ô tô: 800,000 VNĐ/tháng
   - Tiền điện: Theo đồng hồ đo
   - Tiền nước: Theo đồng hồ đo

2. Thời gian thanh toán:
   - Hạn thanh toán: Ngày cuối tháng
   - Phạt chậm: 0.5%/ngày
   - Cắt dịch vụ sau 15 ngày quá hạn

3. Phương thức thanh toán:
   - Chuyển khoản ngân hàng
   - QR Code qua app
   - Tiền mặt tại quầy dịch vụ
",
        last_updated: "01/02/2025",
        priority: Priority::High,
    },
    Regulation {
        id: 5,
        title: "Quy định về sửa chữa",
        category: RegulationCategory::Maintenance,
        content: "
1. Sửa chữa căn hộ:
   - Thông báo trước 24 giờ cho quản lý
   - Giờ sửa chữa: 08:00-17:00 (T2-T6)
   - Không được sửa chữa vào cuối tuần

2. Sửa chữa hệ thống chung:
   - Do quản lý tòa nhà thực hiện
   - Thông báo trước cho cư dân
   - Ưu tiên sửa chữa khẩn cấp

3. Báo cáo sự cố:
   - Hotline: 1900-9999
   - Email: maintenance@bluemoon.com
   - App quản lý tòa nhà
",
        last_updated: "10/02/2025",
        priority: Priority::Medium,
    },
    Regulation {
        id: 6,
        title: "Quy định về thú cưng",
        category: RegulationCategory::Living,
        content: "
1. Đăng ký thú cưng:
   - Đăng ký với quản lý tòa nhà
   - Cung cấp giấy chứng nhận tiêm phòng
   - Phí đăng ký: 500,000 VNĐ/năm

2. Quy định chung:
   - Chỉ được nuôi chó, mèo
   - Không được nuôi động vật hoang dã
   - Phải có dây xích khi ra ngoài

3. Trách nhiệm:
   - Dọn dẹp chất thải của thú cưng
   - Không để thú cưng gây tiếng ồn
   - Bồi thường nếu gây thiệt hại
",
        last_updated: "15/02/2025",
        priority: Priority::Low,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = REGULATIONS.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), REGULATIONS.len());
    }

    #[test]
    fn test_dates_parse() {
        for regulation in REGULATIONS {
            assert!(regulation.last_updated_date().is_some(), "{}", regulation.title);
        }
        assert_eq!(latest_update(REGULATIONS), NaiveDate::from_ymd_opt(2025, 2, 15));
    }

    #[test]
    fn test_category_parse_by_label_and_name() {
        assert_eq!(RegulationCategory::parse("An ninh"), Some(RegulationCategory::Security));
        assert_eq!(RegulationCategory::parse("house-rules"), Some(RegulationCategory::HouseRules));
        assert_eq!(RegulationCategory::parse("tài chính"), Some(RegulationCategory::Finance));
        assert_eq!(RegulationCategory::parse("nope"), None);
    }

    #[test]
    fn test_priority_orders_high_first() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }
}
