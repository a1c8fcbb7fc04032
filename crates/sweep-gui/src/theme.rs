/// Category colours for the review table.
///
/// Two palettes so labels stay legible on both the dark and light visuals.
use egui::Color32;
use sweep_core::Category;

pub fn category_color(category: Category, dark_mode: bool) -> Color32 {
    if dark_mode {
        match category {
            Category::Archive => Color32::from_rgb(0xf9, 0xe2, 0xaf),
            Category::DiskImage => Color32::from_rgb(0xcb, 0xa6, 0xf7),
            Category::Video => Color32::from_rgb(0xf3, 0x8b, 0xa8),
            Category::Log => Color32::from_rgb(0x94, 0xe2, 0xd5),
            Category::Cache => Color32::from_rgb(0xfa, 0xb3, 0x87),
            Category::Other => Color32::from_rgb(0xb8, 0xb8, 0xc4),
        }
    } else {
        match category {
            Category::Archive => Color32::from_rgb(0xdf, 0x8e, 0x1d),
            Category::DiskImage => Color32::from_rgb(0x88, 0x39, 0xef),
            Category::Video => Color32::from_rgb(0xd2, 0x0f, 0x39),
            Category::Log => Color32::from_rgb(0x17, 0x92, 0x99),
            Category::Cache => Color32::from_rgb(0xfe, 0x64, 0x0b),
            Category::Other => Color32::from_rgb(0x5c, 0x5f, 0x77),
        }
    }
}

/// Status-bar colour for warnings and failures.
pub const WARNING: Color32 = Color32::from_rgb(0xfa, 0xb3, 0x87);
/// Status-bar colour for completed actions.
pub const SUCCESS: Color32 = Color32::from_rgb(0xa6, 0xe3, 0xa1);
