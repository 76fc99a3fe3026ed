pub mod details;
pub mod list;

use contracts::enums::user_profile::UserProfile;
use thaw::BadgeColor;

/// Цвет бейджа профиля
pub fn profile_badge_color(profile: UserProfile) -> BadgeColor {
    match profile {
        UserProfile::Admin => BadgeColor::Brand,
        UserProfile::Manager => BadgeColor::Informative,
        UserProfile::Seller => BadgeColor::Success,
        UserProfile::Viewer => BadgeColor::Subtle,
    }
}
