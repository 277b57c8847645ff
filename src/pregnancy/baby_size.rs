//! Barnets storlek vecka för vecka, jämfört med frukt och grönsaker

use serde::Serialize;

/// Storlek i tum/uns (veckokortet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BabySizeInfo {
    pub week: i64,
    pub name: &'static str,
    pub emoji: &'static str,
    pub length: &'static str,
    pub weight: &'static str,
}

/// Storlek i cm/gram (storlekskortet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BabySize {
    pub week: i64,
    pub size: &'static str,
    pub emoji: &'static str,
    pub length_cm: &'static str,
    pub weight_g: &'static str,
}

trait WeekKeyed {
    fn week(&self) -> i64;
}

impl WeekKeyed for BabySizeInfo {
    fn week(&self) -> i64 {
        self.week
    }
}

impl WeekKeyed for BabySize {
    fn week(&self) -> i64 {
        self.week
    }
}

const fn info(
    week: i64,
    name: &'static str,
    emoji: &'static str,
    length: &'static str,
    weight: &'static str,
) -> BabySizeInfo {
    BabySizeInfo { week, name, emoji, length, weight }
}

const fn metric(
    week: i64,
    size: &'static str,
    emoji: &'static str,
    length_cm: &'static str,
    weight_g: &'static str,
) -> BabySize {
    BabySize { week, size, emoji, length_cm, weight_g }
}

pub const BABY_SIZES_IMPERIAL: &[BabySizeInfo] = &[
    info(4, "Poppy seed", "🌱", "0.04 in", "< 0.04 oz"),
    info(5, "Sesame seed", "🫘", "0.05 in", "< 0.04 oz"),
    info(6, "Lentil", "🟤", "0.25 in", "< 0.04 oz"),
    info(7, "Blueberry", "🫐", "0.5 in", "< 0.04 oz"),
    info(8, "Raspberry", "🍇", "0.6 in", "0.04 oz"),
    info(9, "Cherry", "🍒", "0.9 in", "0.07 oz"),
    info(10, "Strawberry", "🍓", "1.2 in", "0.14 oz"),
    info(11, "Lime", "🍋‍🟩", "1.6 in", "0.25 oz"),
    info(12, "Plum", "🟣", "2.1 in", "0.5 oz"),
    info(13, "Peach", "🍑", "2.9 in", "0.8 oz"),
    info(14, "Lemon", "🍋", "3.4 in", "1.5 oz"),
    info(15, "Apple", "🍎", "4 in", "2.5 oz"),
    info(16, "Avocado", "🥑", "4.6 in", "3.5 oz"),
    info(17, "Pear", "🍐", "5.1 in", "5 oz"),
    info(18, "Bell pepper", "🫑", "5.6 in", "6.7 oz"),
    info(19, "Mango", "🥭", "6 in", "8.5 oz"),
    info(20, "Banana", "🍌", "6.5 in", "10 oz"),
    info(21, "Carrot", "🥕", "10.5 in", "12 oz"),
    info(22, "Papaya", "🧡", "11 in", "15 oz"),
    info(23, "Grapefruit", "🍊", "11.4 in", "1.1 lb"),
    info(24, "Corn", "🌽", "11.8 in", "1.3 lb"),
    info(25, "Cauliflower", "🥦", "13.6 in", "1.5 lb"),
    info(26, "Lettuce", "🥬", "14 in", "1.7 lb"),
    info(27, "Cabbage", "🥗", "14.4 in", "2 lb"),
    info(28, "Eggplant", "🍆", "14.8 in", "2.2 lb"),
    info(29, "Butternut squash", "🎃", "15.2 in", "2.5 lb"),
    info(30, "Coconut", "🥥", "15.7 in", "3 lb"),
    info(31, "Pineapple", "🍍", "16.2 in", "3.3 lb"),
    info(32, "Squash", "🟠", "16.7 in", "3.7 lb"),
    info(33, "Celery", "🥒", "17.2 in", "4.2 lb"),
    info(34, "Cantaloupe", "🍈", "17.7 in", "4.7 lb"),
    info(35, "Honeydew", "🍃", "18.2 in", "5.2 lb"),
    info(36, "Romaine lettuce", "🥬", "18.7 in", "5.7 lb"),
    info(37, "Winter melon", "🍉", "19 in", "6.3 lb"),
    info(38, "Leek", "🧅", "19.6 in", "6.8 lb"),
    info(39, "Watermelon", "🍉", "20 in", "7.2 lb"),
    info(40, "Small pumpkin", "🎃", "20.2 in", "7.6 lb"),
];

pub const BABY_SIZES_METRIC: &[BabySize] = &[
    metric(4, "Poppy seed", "🌱", "0.1", "<1"),
    metric(5, "Sesame seed", "🫛", "0.2", "<1"),
    metric(6, "Lentil", "🫘", "0.5", "<1"),
    metric(7, "Blueberry", "🫐", "1.3", "1"),
    metric(8, "Raspberry", "🍇", "1.6", "1"),
    metric(9, "Cherry", "🍒", "2.3", "2"),
    metric(10, "Strawberry", "🍓", "3.1", "4"),
    metric(11, "Fig", "🌰", "4.1", "7"),
    metric(12, "Lime", "🍋", "5.4", "14"),
    metric(13, "Peach", "🍑", "7.4", "23"),
    metric(14, "Lemon", "🍋", "8.7", "43"),
    metric(15, "Apple", "🍎", "10.1", "70"),
    metric(16, "Avocado", "🥑", "11.6", "100"),
    metric(17, "Pear", "🍐", "13", "140"),
    metric(18, "Bell pepper", "🫑", "14.2", "190"),
    metric(19, "Mango", "🥭", "15.3", "240"),
    metric(20, "Banana", "🍌", "16.4", "300"),
    metric(21, "Carrot", "🥕", "26.7", "360"),
    metric(22, "Papaya", "🥭", "27.8", "430"),
    metric(23, "Grapefruit", "🍊", "28.9", "500"),
    metric(24, "Corn on the cob", "🌽", "30", "600"),
    metric(25, "Cauliflower", "🥬", "34.6", "660"),
    metric(26, "Lettuce", "🥗", "35.6", "760"),
    metric(27, "Cabbage", "🥬", "36.6", "875"),
    metric(28, "Eggplant", "🍆", "37.6", "1000"),
    metric(29, "Butternut squash", "🎃", "38.6", "1150"),
    metric(30, "Coconut", "🥥", "39.9", "1320"),
    metric(31, "Pineapple", "🍍", "41.1", "1500"),
    metric(32, "Squash", "🎃", "42.4", "1700"),
    metric(33, "Cantaloupe", "🍈", "43.7", "1920"),
    metric(34, "Honeydew melon", "🍈", "45", "2150"),
    metric(35, "Coconut", "🥥", "46.2", "2380"),
    metric(36, "Romaine lettuce", "🥬", "47.4", "2620"),
    metric(37, "Winter melon", "🍈", "48.6", "2860"),
    metric(38, "Pumpkin", "🎃", "49.8", "3100"),
    metric(39, "Mini watermelon", "🍉", "50.7", "3290"),
    metric(40, "Watermelon", "🍉", "51.2", "3460"),
];

/// Exakt träff, annars första/sista posten utanför tabellen,
/// annars närmaste vecka (första posten vinner vid lika avstånd)
fn closest<T: WeekKeyed>(table: &'static [T], week: i64) -> Option<&'static T> {
    let (first, last) = (table.first()?, table.last()?);

    if let Some(exact) = table.iter().find(|entry| entry.week() == week) {
        return Some(exact);
    }
    if week < first.week() {
        return Some(first);
    }
    if week > last.week() {
        return Some(last);
    }

    table.iter().reduce(|best, candidate| {
        if (candidate.week() - week).abs() < (best.week() - week).abs() {
            candidate
        } else {
            best
        }
    })
}

/// Storleksjämförelse i tum/uns för en graviditetsvecka
pub fn get_baby_size_by_week(week: i64) -> &'static BabySizeInfo {
    closest(BABY_SIZES_IMPERIAL, week).unwrap_or(&BABY_SIZES_IMPERIAL[0])
}

/// Storleksjämförelse i cm/gram för en graviditetsvecka
pub fn get_baby_size(week: i64) -> &'static BabySize {
    closest(BABY_SIZES_METRIC, week).unwrap_or(&BABY_SIZES_METRIC[0])
}
