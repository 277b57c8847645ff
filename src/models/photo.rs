use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::new_id;

/// Magbild i fotoalbumet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BumpPhoto {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    pub week: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BumpPhoto {
    pub fn new(image_url: impl Into<String>, caption: impl Into<String>, week: i64) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            image_url: image_url.into(),
            caption: caption.into(),
            week,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Galleriordning: vecka stigande
pub fn sort_photos_for_gallery(photos: &mut [BumpPhoto]) {
    photos.sort_by_key(|p| p.week);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_order() {
        let mut photos = vec![
            BumpPhoto::new("c.jpg", "", 30),
            BumpPhoto::new("a.jpg", "", 12),
            BumpPhoto::new("b.jpg", "", 20),
        ];
        sort_photos_for_gallery(&mut photos);
        let weeks: Vec<i64> = photos.iter().map(|p| p.week).collect();
        assert_eq!(weeks, vec![12, 20, 30]);
    }
}
