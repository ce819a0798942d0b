//! Sample catalog shown on first load.
//!
//! Three starter items so the grid is not empty when the plugin opens. Disabled
//! with `sample_items "false"` in the plugin configuration.

use crate::domain::{Item, ItemType};
use chrono::{TimeZone, Utc};

const SHIRT_COVER: &str = "https://images.pexels.com/photos/8532616/pexels-photo-8532616.jpeg?auto=compress&cs=tinysrgb&w=800";
const SHIRT_ALT: &str = "https://images.pexels.com/photos/8532595/pexels-photo-8532595.jpeg?auto=compress&cs=tinysrgb&w=800";
const SHOES_COVER: &str = "https://images.pexels.com/photos/2529148/pexels-photo-2529148.jpeg?auto=compress&cs=tinysrgb&w=800";
const SHOES_ALT: &str = "https://images.pexels.com/photos/1464625/pexels-photo-1464625.jpeg?auto=compress&cs=tinysrgb&w=800";
const JEANS_COVER: &str = "https://images.pexels.com/photos/1598507/pexels-photo-1598507.jpeg?auto=compress&cs=tinysrgb&w=800";
const JEANS_ALT: &str = "https://images.pexels.com/photos/1598505/pexels-photo-1598505.jpeg?auto=compress&cs=tinysrgb&w=800";

fn sample(
    id: &str,
    name: &str,
    item_type: ItemType,
    description: &str,
    images: [&str; 2],
    (year, month, day): (i32, u32, u32),
) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        item_type,
        description: description.to_string(),
        cover_image: images[0].to_string(),
        additional_images: images.iter().map(|s| (*s).to_string()).collect(),
        created_at: Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// Returns the sample items in display order.
#[must_use]
pub fn sample_items() -> Vec<Item> {
    vec![
        sample(
            "1",
            "Classic Cotton T-Shirt",
            ItemType::Shirt,
            "A comfortable, high-quality cotton t-shirt perfect for everyday wear. Made from 100% organic cotton with a relaxed fit.",
            [SHIRT_COVER, SHIRT_ALT],
            (2024, 1, 15),
        ),
        sample(
            "2",
            "Athletic Running Shoes",
            ItemType::Shoes,
            "Professional running shoes designed for comfort and performance. Features advanced cushioning technology and breathable mesh upper.",
            [SHOES_COVER, SHOES_ALT],
            (2024, 1, 20),
        ),
        sample(
            "3",
            "Slim Fit Denim Jeans",
            ItemType::Pant,
            "Premium denim jeans with a modern slim fit. Crafted from high-quality denim with stretch for comfort and durability.",
            [JEANS_COVER, JEANS_ALT],
            (2024, 1, 25),
        ),
    ]
}
