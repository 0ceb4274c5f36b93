//! Staff and resident profiles.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Editable fields of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Position,
    Department,
    Since,
    Bio,
}

impl ProfileField {
    /// All fields in form order.
    pub const ALL: [ProfileField; 9] = [
        ProfileField::LastName,
        ProfileField::FirstName,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Address,
        ProfileField::Position,
        ProfileField::Department,
        ProfileField::Since,
        ProfileField::Bio,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FirstName => "Họ",
            ProfileField::LastName => "Tên",
            ProfileField::Email => "Email",
            ProfileField::Phone => "Số điện thoại",
            ProfileField::Address => "Địa chỉ",
            ProfileField::Position => "Chức vụ",
            ProfileField::Department => "Bộ phận",
            ProfileField::Since => "Ngày bắt đầu",
            ProfileField::Bio => "Giới thiệu",
        }
    }
}

/// A user's profile.
///
/// For residents `position` holds the apartment and `department` the
/// building; `since` is the join (or move-in) date, `yyyy-mm-dd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position: String,
    pub department: String,
    pub since: String,
    pub bio: String,
}

impl Profile {
    /// The sample profile shown for a role.
    pub fn sample(role: Role) -> Self {
        let (first, last, email, phone, address, position, department, since, bio) = match role {
            Role::Admin => (
                "Admin",
                "User",
                "admin@buildinghub.com",
                "+1 (555) 123-4567",
                "123 Main Street, New York, NY 10001",
                "Building Manager",
                "Management",
                "2023-01-15",
                "Experienced building manager with over 5 years of experience in residential property management.",
            ),
            Role::Resident => (
                "Nguyễn",
                "Văn A",
                "nguyenvana@example.com",
                "0901234567",
                "Căn hộ 304, Tòa nhà BuildingHub",
                "Căn hộ 304",
                "Tòa A",
                "2023-06-15",
                "Cư dân tại tòa nhà BuildingHub từ năm 2023.",
            ),
            Role::Accountant => (
                "Nguyễn",
                "Thị B",
                "ketoan@buildinghub.com",
                "0909876543",
                "Phòng Kế Toán, Tòa nhà BuildingHub",
                "Kế Toán Trưởng",
                "Phòng Kế Toán",
                "2023-03-01",
                "Kế toán viên chuyên nghiệp với nhiều năm kinh nghiệm trong quản lý tài chính và công nợ.",
            ),
            Role::Authority => (
                "Nguyễn",
                "Văn C",
                "coquan@buildinghub.com",
                "0901111111",
                "Cơ Quan Chức Năng, Tòa nhà BuildingHub",
                "Cán Bộ Cơ Quan Chức Năng",
                "Phòng Quản Lý Cư Dân",
                "2023-05-01",
                "Cán bộ chuyên trách quản lý cư dân và theo dõi các thông báo mất đồ trong tòa nhà.",
            ),
        };
        Self {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            position: position.to_string(),
            department: department.to_string(),
            since: since.to_string(),
            bio: bio.to_string(),
        }
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter avatar initials.
    pub fn initials(&self) -> String {
        self.first_name.chars().take(1).chain(self.last_name.chars().take(1)).collect()
    }

    /// Read a field.
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Address => &self.address,
            ProfileField::Position => &self.position,
            ProfileField::Department => &self.department,
            ProfileField::Since => &self.since,
            ProfileField::Bio => &self.bio,
        }
    }

    /// Mutable access to a field.
    pub fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Address => &mut self.address,
            ProfileField::Position => &mut self.position,
            ProfileField::Department => &mut self.department,
            ProfileField::Since => &mut self.since,
            ProfileField::Bio => &mut self.bio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_handle_multibyte() {
        let profile = Profile::sample(Role::Authority);
        assert_eq!(profile.initials(), "NV");
        assert_eq!(profile.display_name(), "Nguyễn Văn C");
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut profile = Profile::sample(Role::Admin);
        profile.get_mut(ProfileField::Phone).push_str(" ext 9");
        assert_eq!(profile.get(ProfileField::Phone), "+1 (555) 123-4567 ext 9");
    }
}
