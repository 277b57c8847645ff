//! Duas och verser för blivande mammor

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuaCategory {
    Protection,
    Ease,
    Gratitude,
    Baby,
    Strength,
    Peace,
}

impl DuaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protection => "protection",
            Self::Ease => "ease",
            Self::Gratitude => "gratitude",
            Self::Baby => "baby",
            Self::Strength => "strength",
            Self::Peace => "peace",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Protection,
            Self::Ease,
            Self::Gratitude,
            Self::Baby,
            Self::Strength,
            Self::Peace,
        ]
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "protection" => Some(Self::Protection),
            "ease" => Some(Self::Ease),
            "gratitude" => Some(Self::Gratitude),
            "baby" => Some(Self::Baby),
            "strength" => Some(Self::Strength),
            "peace" => Some(Self::Peace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dua {
    pub id: &'static str,
    pub arabic: Option<&'static str>,
    pub transliteration: Option<&'static str>,
    pub translation: &'static str,
    pub source: &'static str,
    pub category: DuaCategory,
}

const fn verse(
    id: &'static str,
    arabic: &'static str,
    transliteration: &'static str,
    translation: &'static str,
    source: &'static str,
    category: DuaCategory,
) -> Dua {
    Dua {
        id,
        arabic: Some(arabic),
        transliteration: Some(transliteration),
        translation,
        source,
        category,
    }
}

pub const PREGNANCY_DUAS: &[Dua] = &[
    verse(
        "dua-1",
        "رَبِّ هَبْ لِي مِن لَّدُنكَ ذُرِّيَّةً طَيِّبَةً ۖ إِنَّكَ سَمِيعُ الدُّعَاءِ",
        "Rabbi hab li min ladunka dhurriyyatan tayyibah innaka sami'ud-du'a",
        "My Lord, grant me from Yourself a good offspring. Indeed, You are the Hearer of supplication.",
        "Surah Ali 'Imran 3:38",
        DuaCategory::Baby,
    ),
    verse(
        "dua-2",
        "رَبِّ لَا تَذَرْنِي فَرْدًا وَأَنتَ خَيْرُ الْوَارِثِينَ",
        "Rabbi la tadharnee fardan wa anta khayrul-waritheen",
        "My Lord, do not leave me alone [with no heir], while You are the best of inheritors.",
        "Surah Al-Anbiya 21:89",
        DuaCategory::Baby,
    ),
    verse(
        "dua-3",
        "رَبَّنَا هَبْ لَنَا مِنْ أَزْوَاجِنَا وَذُرِّيَّاتِنَا قُرَّةَ أَعْيُنٍ",
        "Rabbana hab lana min azwajina wa dhurriyyatina qurrata a'yun",
        "Our Lord, grant us from among our spouses and offspring comfort to our eyes.",
        "Surah Al-Furqan 25:74",
        DuaCategory::Baby,
    ),
    verse(
        "dua-4",
        "حَسْبِيَ اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ ۖ عَلَيْهِ تَوَكَّلْتُ",
        "Hasbiyallahu la ilaha illa Huwa, 'alayhi tawakkaltu",
        "Sufficient for me is Allah; there is no deity except Him. On Him I have relied.",
        "Surah At-Tawbah 9:129",
        DuaCategory::Protection,
    ),
    verse(
        "dua-5",
        "رَبِّ اجْعَلْنِي مُقِيمَ الصَّلَاةِ وَمِن ذُرِّيَّتِي",
        "Rabbij'alni muqeemas-salati wa min dhurriyyati",
        "My Lord, make me an establisher of prayer, and [many] from my descendants.",
        "Surah Ibrahim 14:40",
        DuaCategory::Baby,
    ),
    verse(
        "dua-6",
        "إِنَّ مَعَ الْعُسْرِ يُسْرًا",
        "Inna ma'al 'usri yusra",
        "Indeed, with hardship comes ease.",
        "Surah Ash-Sharh 94:6",
        DuaCategory::Ease,
    ),
    verse(
        "dua-7",
        "رَبِّ أَوْزِعْنِي أَنْ أَشْكُرَ نِعْمَتَكَ",
        "Rabbi awzi'ni an ashkura ni'mataka",
        "My Lord, enable me to be grateful for Your favor.",
        "Surah An-Naml 27:19",
        DuaCategory::Gratitude,
    ),
    verse(
        "dua-8",
        "اللَّهُمَّ إِنِّي أَسْأَلُكَ الْعَافِيَةَ",
        "Allahumma inni as'alukal-'afiyah",
        "O Allah, I ask You for well-being and safety.",
        "Hadith - Tirmidhi",
        DuaCategory::Protection,
    ),
    verse(
        "dua-9",
        "رَبِّ إِنِّي لِمَا أَنزَلْتَ إِلَيَّ مِنْ خَيْرٍ فَقِيرٌ",
        "Rabbi inni lima anzalta ilayya min khayrin faqeer",
        "My Lord, indeed I am in need of whatever good You would send down to me.",
        "Surah Al-Qasas 28:24",
        DuaCategory::Gratitude,
    ),
    verse(
        "dua-10",
        "وَتَوَكَّلْ عَلَى الْحَيِّ الَّذِي لَا يَمُوتُ",
        "Wa tawakkal 'alal-Hayyil-ladhi la yamoot",
        "And rely upon the Ever-Living who does not die.",
        "Surah Al-Furqan 25:58",
        DuaCategory::Strength,
    ),
    verse(
        "dua-11",
        "رَبَّنَا آتِنَا فِي الدُّنْيَا حَسَنَةً وَفِي الْآخِرَةِ حَسَنَةً",
        "Rabbana atina fid-dunya hasanatan wa fil-akhirati hasanah",
        "Our Lord, give us good in this world and good in the Hereafter.",
        "Surah Al-Baqarah 2:201",
        DuaCategory::Peace,
    ),
    verse(
        "dua-12",
        "رَبَّنَا أَفْرِغْ عَلَيْنَا صَبْرًا",
        "Rabbana afrigh 'alayna sabra",
        "Our Lord, pour upon us patience.",
        "Surah Al-Baqarah 2:250",
        DuaCategory::Strength,
    ),
    verse(
        "dua-13",
        "اللَّهُمَّ إِنِّي أَعُوذُ بِكَ مِنَ الْهَمِّ وَالْحَزَنِ",
        "Allahumma inni a'udhu bika minal-hammi wal-hazan",
        "O Allah, I seek refuge in You from worry and grief.",
        "Hadith - Bukhari",
        DuaCategory::Peace,
    ),
    verse(
        "dua-14",
        "لَا إِلَٰهَ إِلَّا أَنتَ سُبْحَانَكَ إِنِّي كُنتُ مِنَ الظَّالِمِينَ",
        "La ilaha illa Anta, Subhanaka, inni kuntu minaz-zalimin",
        "There is no deity except You; exalted are You. Indeed, I have been of the wrongdoers.",
        "Surah Al-Anbiya 21:87",
        DuaCategory::Ease,
    ),
    Dua {
        id: "dua-15",
        arabic: None,
        transliteration: None,
        translation: "May Allah bless you with a healthy pregnancy and a righteous child who will be the coolness of your eyes.",
        source: "General Dua",
        category: DuaCategory::Baby,
    },
];

/// Dagens dua, vald efter dag på året
pub fn daily_dua(date: NaiveDate) -> &'static Dua {
    &PREGNANCY_DUAS[date.ordinal() as usize % PREGNANCY_DUAS.len()]
}

pub fn duas_by_category(category: DuaCategory) -> Vec<&'static Dua> {
    PREGNANCY_DUAS
        .iter()
        .filter(|d| d.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_dua_follows_day_of_year() {
        let jan_15 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(daily_dua(jan_15).id, "dua-1");

        let jan_16 = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert_eq!(daily_dua(jan_16).id, "dua-2");
    }

    #[test]
    fn test_duas_by_category() {
        let baby = duas_by_category(DuaCategory::Baby);
        assert_eq!(baby.len(), 5);
        assert!(baby.iter().all(|d| d.category == DuaCategory::Baby));

        assert_eq!(duas_by_category(DuaCategory::Strength).len(), 2);
    }

    #[test]
    fn test_category_names() {
        for c in DuaCategory::all() {
            assert_eq!(DuaCategory::from_str_opt(c.as_str()), Some(*c));
        }
        assert_eq!(DuaCategory::from_str_opt("joy"), None);
    }
}
