use crate::entities::*;
use std::cmp::Ordering;

pub trait SortByRating {
    /// Highest rating first.
    fn sort_by_rating(&mut self);
}

impl SortByRating for [Spot] {
    fn sort_by_rating(&mut self) {
        self.sort_by(|a, b| {
            f64::from(b.rating)
                .partial_cmp(&f64::from(a.rating))
                .unwrap_or(Ordering::Equal)
        })
    }
}

pub trait SortByName {
    fn sort_by_name(&mut self);
}

impl SortByName for [Spot] {
    fn sort_by_name(&mut self) {
        self.sort_by(|a, b| compare_names(&a.name, &b.name))
    }
}

pub trait SortByCreatedAt {
    /// Newest first.
    fn sort_by_created_at(&mut self);
}

impl SortByCreatedAt for [Spot] {
    fn sort_by_created_at(&mut self) {
        self.sort_by(|a, b| b.created_at.cmp(&a.created_at))
    }
}

pub trait SortByDistanceTo {
    /// Nearest first. Spots without valid coordinates are moved to
    /// the end and keep their relative order.
    fn sort_by_distance_to(&mut self, pos: MapPoint);
}

impl SortByDistanceTo for [Spot] {
    fn sort_by_distance_to(&mut self, pos: MapPoint) {
        if !pos.is_valid() {
            log::warn!(
                "Invalid reference position: {}/{}",
                pos.lat_deg(),
                pos.lng_deg()
            );
            return;
        }
        let distance = |s: &Spot| {
            s.coordinates
                .filter(|c| c.is_valid())
                .map(|c| c.distance_km(pos))
        };
        self.sort_by(|a, b| match (distance(a), distance(b)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    }
}

/// Compares names similar to a locale-aware collation: letter case
/// and diacritics only break ties, whitespace and punctuation sort
/// before digits and digits before letters.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .map(|c| (char_class(c), c))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_ascii_punctuation() {
        1
    } else if c.is_numeric() {
        3
    } else if c.is_alphabetic() {
        4
    } else {
        2
    }
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        'ł' => 'l',
        _ => c,
    }
}
