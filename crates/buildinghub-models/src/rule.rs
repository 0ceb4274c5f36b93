//! Building rules shown to residents.

use serde::Serialize;

/// Category of a building rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    SafetySecurity,
    Hours,
    Hygiene,
    Traffic,
    Services,
}

impl RuleCategory {
    /// All categories in display order.
    pub const ALL: [RuleCategory; 5] = [
        RuleCategory::SafetySecurity,
        RuleCategory::Hours,
        RuleCategory::Hygiene,
        RuleCategory::Traffic,
        RuleCategory::Services,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RuleCategory::SafetySecurity => "An toàn & Bảo mật",
            RuleCategory::Hours => "Giờ giấc",
            RuleCategory::Hygiene => "Vệ sinh & Môi trường",
            RuleCategory::Traffic => "Giao thông",
            RuleCategory::Services => "Sử dụng dịch vụ",
        }
    }

    /// Whether rules in this category count as safety rules.
    pub fn is_safety(self) -> bool {
        matches!(self, RuleCategory::SafetySecurity)
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

/// Badge shown next to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleIcon {
    Info,
    Alert,
    Check,
}

/// A building rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: u32,
    pub category: RuleCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: RuleIcon,
}

/// Distinct categories present in `rules`, in first-seen order.
pub fn present_categories(rules: &[Rule]) -> Vec<RuleCategory> {
    let mut seen = Vec::new();
    for rule in rules {
        if !seen.contains(&rule.category) {
            seen.push(rule.category);
        }
    }
    seen
}

/// The building's rules.
pub static RULES: &[Rule] = &[
    Rule {
        id: 1,
        category: RuleCategory::SafetySecurity,
        title: "Quy định về an toàn cháy nổ",
        description: "Cư dân không được để các vật dụng dễ cháy ở hành lang, cầu thang. Không hút thuốc trong khu vực chung. Phải tuân thủ các quy định về phòng cháy chữa cháy.",
        icon: RuleIcon::Alert,
    },
    Rule {
        id: 2,
        category: RuleCategory::Hours,
        title: "Quy định về giờ giấc sinh hoạt",
        description: "Từ 22:00 - 06:00, cư dân cần giữ yên tĩnh, không gây tiếng ồn ảnh hưởng đến hàng xóm. Các hoạt động sửa chữa chỉ được thực hiện từ 08:00 - 18:00 trong ngày thường.",
        icon: RuleIcon::Info,
    },
    Rule {
        id: 3,
        category: RuleCategory::Hygiene,
        title: "Quy định về vệ sinh chung",
        description: "Rác thải phải được phân loại và bỏ đúng nơi quy định. Không vứt rác bừa bãi trong khu vực chung. Giữ gìn vệ sinh hành lang, thang máy, sân chung.",
        icon: RuleIcon::Check,
    },
    Rule {
        id: 4,
        category: RuleCategory::Traffic,
        title: "Quy định về đỗ xe",
        description: "Xe phải đỗ đúng vị trí được phân bổ. Không đỗ xe ở lối đi, cửa thoát hiểm. Tốc độ trong khu vực chung không quá 10km/h. Tuân thủ biển báo giao thông.",
        icon: RuleIcon::Alert,
    },
    Rule {
        id: 5,
        category: RuleCategory::Services,
        title: "Quy định về sử dụng thang máy",
        description: "Ưu tiên người già, trẻ em, phụ nữ có thai. Không sử dụng thang máy để vận chuyển hàng hóa cồng kềnh trong giờ cao điểm. Báo ngay khi phát hiện sự cố.",
        icon: RuleIcon::Info,
    },
    Rule {
        id: 6,
        category: RuleCategory::SafetySecurity,
        title: "Quy định về khách đến thăm",
        description: "Khách đến thăm phải đăng ký tại bảo vệ. Không cho người lạ vào tòa nhà. Cư dân chịu trách nhiệm về hành vi của khách mời.",
        icon: RuleIcon::Alert,
    },
    Rule {
        id: 7,
        category: RuleCategory::Services,
        title: "Quy định về sử dụng điện nước",
        description: "Sử dụng tiết kiệm điện, nước. Không tự ý sửa chữa hệ thống điện nước chung. Báo ngay khi phát hiện rò rỉ hoặc sự cố.",
        icon: RuleIcon::Check,
    },
    Rule {
        id: 8,
        category: RuleCategory::Hygiene,
        title: "Quy định về nuôi thú cưng",
        description: "Chỉ được nuôi thú cưng với sự đồng ý của ban quản lý. Phải đảm bảo vệ sinh, không để thú cưng gây ồn hoặc làm phiền hàng xóm. Dắt thú cưng bằng dây xích khi ra ngoài.",
        icon: RuleIcon::Info,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_categories_in_first_seen_order() {
        assert_eq!(
            present_categories(RULES),
            vec![
                RuleCategory::SafetySecurity,
                RuleCategory::Hours,
                RuleCategory::Hygiene,
                RuleCategory::Traffic,
                RuleCategory::Services,
            ]
        );
    }

    #[test]
    fn test_safety_rules_counted_by_variant() {
        let safety = RULES.iter().filter(|r| r.category.is_safety()).count();
        assert_eq!(safety, 2);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(RuleCategory::parse("giao thông"), Some(RuleCategory::Traffic));
        assert_eq!(RuleCategory::parse("safety-security"), Some(RuleCategory::SafetySecurity));
        assert_eq!(RuleCategory::parse("Tiện ích"), None);
    }
}
